use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Row ID")]
    row_id: i64,
    #[serde(rename = "Region")]
    region: &'static str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Sub-Category")]
    sub_category: &'static str,
    #[serde(rename = "Sales")]
    sales: f64,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "Discount")]
    discount: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let regions = ["West", "East", "Central", "South"];
    // (category, sub-category, typical unit price, typical margin)
    let catalogue: [(&str, &str, f64, f64); 9] = [
        ("Furniture", "Chairs", 160.0, 0.08),
        ("Furniture", "Tables", 320.0, -0.05),
        ("Furniture", "Bookcases", 210.0, 0.02),
        ("Office Supplies", "Paper", 12.0, 0.43),
        ("Office Supplies", "Binders", 25.0, 0.15),
        ("Office Supplies", "Storage", 70.0, 0.10),
        ("Technology", "Phones", 120.0, 0.13),
        ("Technology", "Copiers", 700.0, 0.30),
        ("Technology", "Accessories", 55.0, 0.22),
    ];

    let mut rows = Vec::new();
    for row_id in 1..=2000 {
        let region = regions[(rng.next_u64() % regions.len() as u64) as usize];
        let (category, sub_category, price, margin) =
            catalogue[(rng.next_u64() % catalogue.len() as u64) as usize];

        let quantity = 1 + (rng.next_u64() % 14) as i64;
        let discount = [0.0, 0.0, 0.1, 0.2, 0.5][(rng.next_u64() % 5) as usize];
        let unit_price = (price * (1.0 + rng.gauss(0.0, 0.25))).max(1.0);
        let sales = round2(unit_price * quantity as f64 * (1.0 - discount));
        let profit = round2(sales * (margin - discount * 0.8 + rng.gauss(0.0, 0.05)));

        rows.push(Row {
            row_id,
            region,
            category,
            sub_category,
            sales,
            quantity,
            discount,
            profit,
        });
    }

    // Write CSV
    let csv_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    for row in &rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Write Parquet
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
            Arc::new(StringArray::from(rows.iter().map(|r| r.region).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.category).collect::<Vec<_>>())),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.sub_category).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.sales).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.profit).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.quantity).collect::<Vec<_>>())),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "sample_sales.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {} sales rows to {csv_path} and {parquet_path}", rows.len());
}
