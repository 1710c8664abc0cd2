use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Dimension – a categorical column the user can filter on
// ---------------------------------------------------------------------------

/// Categorical columns of the sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Region,
    Category,
    SubCategory,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Region,
        Dimension::Category,
        Dimension::SubCategory,
    ];

    /// Header name of the column in the source data.
    pub fn column_name(self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::Category => "Category",
            Dimension::SubCategory => "Sub-Category",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one row of the source table
// ---------------------------------------------------------------------------

/// Required source columns, in display order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Region",
    "Category",
    "Sub-Category",
    "Sales",
    "Profit",
    "Quantity",
];

/// A single sales transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-Category")]
    pub sub_category: String,
    #[serde(rename = "Sales")]
    pub sales: f64,
    /// May be negative.
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

impl SalesRecord {
    /// Value of a categorical column.
    pub fn dimension(&self, dim: Dimension) -> &str {
        match dim {
            Dimension::Region => &self.region,
            Dimension::Category => &self.category,
            Dimension::SubCategory => &self.sub_category,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesTable – the complete loaded table
// ---------------------------------------------------------------------------

/// An immutable table of records with pre-computed distinct values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesTable {
    pub records: Vec<SalesRecord>,
    /// For each dimension the distinct values in order of first appearance.
    pub distinct_values: BTreeMap<Dimension, Vec<String>>,
}

impl SalesTable {
    /// Build the distinct-value index from the loaded records.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let distinct_values = index_distinct(&records);
        SalesTable {
            records,
            distinct_values,
        }
    }

    /// Distinct values of one dimension, empty if the table has no rows.
    pub fn distinct(&self, dim: Dimension) -> &[String] {
        self.distinct_values
            .get(&dim)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn index_distinct(records: &[SalesRecord]) -> BTreeMap<Dimension, Vec<String>> {
    let mut distinct_values: BTreeMap<Dimension, Vec<String>> = BTreeMap::new();
    let mut seen: BTreeMap<Dimension, BTreeSet<&str>> = BTreeMap::new();

    for rec in records {
        for dim in Dimension::ALL {
            let value = rec.dimension(dim);
            if seen.entry(dim).or_default().insert(value) {
                distinct_values
                    .entry(dim)
                    .or_default()
                    .push(value.to_string());
            }
        }
    }
    distinct_values
}

#[cfg(test)]
pub(crate) fn record(
    region: &str,
    category: &str,
    sub_category: &str,
    sales: f64,
    profit: f64,
    quantity: u32,
) -> SalesRecord {
    SalesRecord {
        region: region.to_string(),
        category: category.to_string(),
        sub_category: sub_category.to_string(),
        sales,
        profit,
        quantity,
    }
}
