use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{REQUIRED_COLUMNS, SalesRecord, SalesTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a sales table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the required columns
/// * `.json`    – `[{ "Region": ..., "Sales": ..., ... }, ...]`
/// * `.parquet` – flat columns with the required names
pub fn load_file(path: &Path) -> Result<SalesTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file)
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text.  Columns other than the required ones are ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<SalesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SalesRecord>().enumerate() {
        let row = row_no + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;
        check_finite(&record).with_context(|| format!("CSV row {row}"))?;
        records.push(record);
    }

    Ok(SalesTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Region": "West", "Category": "Furniture", "Sub-Category": "Chairs",
///     "Sales": 731.94, "Profit": 219.58, "Quantity": 3 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SalesTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<SalesTable> {
    let records: Vec<SalesRecord> =
        serde_json::from_str(text).context("parsing JSON sales records")?;
    for (i, record) in records.iter().enumerate() {
        check_finite(record).with_context(|| format!("JSON record {}", i + 1))?;
    }
    Ok(SalesTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per required field.
///
/// Dimension columns must be strings; `Sales`/`Profit` may be any float or
/// integer type and `Quantity` any integer type.
fn load_parquet(path: &Path) -> Result<SalesTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    // Row numbers in errors are 1-based and count across batches.
    let mut offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut cols = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            cols.push(batch.column(idx));
        }
        let [region, category, sub_category, sales, profit, quantity_col] = cols[..] else {
            bail!("unexpected column count");
        };

        for batch_row in 0..batch.num_rows() {
            let row = offset + batch_row + 1;
            let quantity = extract_integer(quantity_col, batch_row)
                .with_context(|| format!("Row {row}: failed to read 'Quantity'"))?;
            let quantity = u32::try_from(quantity)
                .with_context(|| format!("Row {row}: 'Quantity' {quantity} out of range"))?;

            let record = SalesRecord {
                region: extract_string(region, batch_row)
                    .with_context(|| format!("Row {row}: failed to read 'Region'"))?,
                category: extract_string(category, batch_row)
                    .with_context(|| format!("Row {row}: failed to read 'Category'"))?,
                sub_category: extract_string(sub_category, batch_row)
                    .with_context(|| format!("Row {row}: failed to read 'Sub-Category'"))?,
                sales: extract_f64(sales, batch_row)
                    .with_context(|| format!("Row {row}: failed to read 'Sales'"))?,
                profit: extract_f64(profit, batch_row)
                    .with_context(|| format!("Row {row}: failed to read 'Profit'"))?,
                quantity,
            };
            check_finite(&record).with_context(|| format!("Row {row}"))?;
            records.push(record);
        }
        offset += batch.num_rows();
    }

    Ok(SalesTable::from_records(records))
}

/// Reject `NaN` and infinite `Sales` / `Profit` values.
fn check_finite(record: &SalesRecord) -> Result<()> {
    if !record.sales.is_finite() {
        bail!("'Sales' is not a finite number: {}", record.sales);
    }
    if !record.profit.is_finite() {
        bail!("'Profit' is not a finite number: {}", record.profit);
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected string column, got {other:?}"),
    }
}

fn extract_integer(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("Expected integer column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 | DataType::Int64 => Ok(extract_integer(col, row)? as f64),
        other => bail!("Expected numeric column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dimension, record};

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    const CSV: &str = "\
Row ID,Region,Category,Sub-Category,Sales,Quantity,Discount,Profit
1,South,Furniture,Bookcases,261.96,2,0,41.9136
2,West,Office Supplies,Labels,14.62,2,0,6.8714
3,South,Furniture,Tables,957.5775,5,0.45,-383.031
";

    #[test]
    fn csv_ignores_extra_columns_and_keeps_order() {
        let table = parse_csv(CSV.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.records[0],
            record("South", "Furniture", "Bookcases", 261.96, 41.9136, 2)
        );
        assert_eq!(table.records[2].profit, -383.031);
        assert_eq!(table.distinct(Dimension::Region), ["South", "West"]);
    }

    #[test]
    fn csv_missing_column_is_schema_error() {
        let err = parse_csv("Region,Category,Sales,Profit,Quantity\nWest,Furniture,1,1,1\n".as_bytes())
            .unwrap_err();
        assert!(format!("{err:#}").contains("'Sub-Category'"));
    }

    #[test]
    fn csv_rejects_negative_quantity() {
        let text = "Region,Category,Sub-Category,Sales,Profit,Quantity\nWest,Furniture,Chairs,1.0,1.0,-2\n";
        let err = parse_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn csv_rejects_non_numeric_sales() {
        let text = "Region,Category,Sub-Category,Sales,Profit,Quantity\nWest,Furniture,Chairs,lots,1.0,2\n";
        assert!(parse_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn csv_rejects_non_finite_sales_and_profit() {
        let header = "Region,Category,Sub-Category,Sales,Profit,Quantity\n";

        let nan_sales = format!("{header}West,Furniture,Chairs,NaN,5,1\n");
        let err = parse_csv(nan_sales.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 1"), "{msg}");
        assert!(msg.contains("'Sales'"), "{msg}");

        let inf_profit = format!("{header}West,Furniture,Chairs,10,5,1\nEast,Technology,Phones,100,inf,2\n");
        let err = parse_csv(inf_profit.as_bytes()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 2"), "{msg}");
        assert!(msg.contains("'Profit'"), "{msg}");
    }

    #[test]
    fn csv_with_header_only_is_empty_table() {
        let text = "Region,Category,Sub-Category,Sales,Profit,Quantity\n";
        assert!(parse_csv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn json_records_load() {
        let text = r#"[
            {"Region": "West", "Category": "Technology", "Sub-Category": "Phones",
             "Sales": 907.152, "Profit": 90.7152, "Quantity": 6, "Ship Mode": "Second Class"}
        ]"#;
        let table = parse_json(text).unwrap();
        assert_eq!(
            table.records,
            vec![record("West", "Technology", "Phones", 907.152, 90.7152, 6)]
        );
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_json(r#"{"Region": "West"}"#).is_err());
    }

    #[test]
    fn load_file_dispatches_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("sales.CSV");
        std::fs::write(&csv_path, CSV).unwrap();
        assert_eq!(load_file(&csv_path).unwrap().len(), 3);

        let txt_path = dir.path().join("sales.txt");
        std::fs::write(&txt_path, CSV).unwrap();
        let err = load_file(&txt_path).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn parquet_with_mixed_numeric_types_loads() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Region", DataType::Utf8, false),
            Field::new("Category", DataType::Utf8, false),
            Field::new("Sub-Category", DataType::Utf8, false),
            Field::new("Sales", DataType::Float64, false),
            Field::new("Profit", DataType::Int64, false),
            Field::new("Quantity", DataType::Int32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["West", "East"])),
                Arc::new(StringArray::from(vec!["Furniture", "Technology"])),
                Arc::new(StringArray::from(vec!["Chairs", "Phones"])),
                Arc::new(Float64Array::from(vec![120.5, 80.0])),
                Arc::new(Int64Array::from(vec![-15, 12])),
                Arc::new(Int32Array::from(vec![4, 1])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(
            table.records,
            vec![
                record("West", "Furniture", "Chairs", 120.5, -15.0, 4),
                record("East", "Technology", "Phones", 80.0, 12.0, 1),
            ]
        );
    }

    #[test]
    fn parquet_errors_count_rows_across_batches() {
        // More rows than one default reader batch (1024), bad value near the end.
        let rows = 1030;
        let mut sales = vec![10.0; rows];
        sales[rows - 1] = f64::NAN;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Region", DataType::Utf8, false),
            Field::new("Category", DataType::Utf8, false),
            Field::new("Sub-Category", DataType::Utf8, false),
            Field::new("Sales", DataType::Float64, false),
            Field::new("Profit", DataType::Float64, false),
            Field::new("Quantity", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["West"; rows])),
                Arc::new(StringArray::from(vec!["Furniture"; rows])),
                Arc::new(StringArray::from(vec!["Chairs"; rows])),
                Arc::new(Float64Array::from(sales)),
                Arc::new(Float64Array::from(vec![1.0; rows])),
                Arc::new(Int64Array::from(vec![1; rows])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let msg = format!("{:#}", load_file(&path).unwrap_err());
        assert!(msg.contains("Row 1030"), "{msg}");
        assert!(msg.contains("not a finite number"), "{msg}");
    }

    #[test]
    fn parquet_missing_column_is_error() {
        let schema = Arc::new(Schema::new(vec![Field::new("Region", DataType::Utf8, false)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(StringArray::from(vec!["West"]))],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.pq");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("'Category'"));
    }
}
