use super::model::{Dimension, SalesTable};

// ---------------------------------------------------------------------------
// KPI snapshot
// ---------------------------------------------------------------------------

/// Summary metrics over one filtered view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiSnapshot {
    pub total_sales: f64,
    pub total_profit: f64,
    /// `total_profit / total_sales × 100`; `None` when there are no sales.
    pub margin_percent: Option<f64>,
}

/// Sum sales and profit and derive the margin.
pub fn aggregate(table: &SalesTable) -> KpiSnapshot {
    let (total_sales, total_profit) = table
        .records
        .iter()
        .fold((0.0, 0.0), |(sales, profit), rec| {
            (sales + rec.sales, profit + rec.profit)
        });

    let margin_percent = if total_sales == 0.0 {
        None
    } else {
        Some(total_profit / total_sales * 100.0)
    };

    KpiSnapshot {
        total_sales,
        total_profit,
        margin_percent,
    }
}

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// One bar of the "sales by category" chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySales {
    pub category: String,
    pub sales: f64,
}

/// Summed sales per category, in order of first appearance.
pub fn sales_by_category(table: &SalesTable) -> Vec<CategorySales> {
    let mut bars: Vec<CategorySales> = table
        .distinct(Dimension::Category)
        .iter()
        .map(|category| CategorySales {
            category: category.clone(),
            sales: 0.0,
        })
        .collect();

    for rec in &table.records {
        if let Some(bar) = bars.iter_mut().find(|b| b.category == rec.category) {
            bar.sales += rec.sales;
        }
    }
    bars
}

/// One marker of the profit-vs-sales scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub sales: f64,
    pub profit: f64,
    pub region: String,
    pub sub_category: String,
    pub quantity: u32,
}

pub fn scatter_points(table: &SalesTable) -> Vec<ScatterPoint> {
    table
        .records
        .iter()
        .map(|rec| ScatterPoint {
            sales: rec.sales,
            profit: rec.profit,
            region: rec.region.clone(),
            sub_category: rec.sub_category.clone(),
            quantity: rec.quantity,
        })
        .collect()
}

pub const MIN_MARKER_RADIUS: f32 = 2.0;
pub const MAX_MARKER_RADIUS: f32 = 12.0;

/// Marker radius scaled so the marker *area* grows with quantity.
pub fn marker_radius(quantity: u32, max_quantity: u32) -> f32 {
    if max_quantity == 0 {
        return MIN_MARKER_RADIUS;
    }
    let ratio = (quantity.min(max_quantity) as f32 / max_quantity as f32).sqrt();
    MIN_MARKER_RADIUS + ratio * (MAX_MARKER_RADIUS - MIN_MARKER_RADIUS)
}

/// The point closest to `(x, y)`, with each axis normalised by `scale`
/// (usually the data's width and height) so neither axis dominates.
pub fn nearest_point<'a>(
    points: impl IntoIterator<Item = &'a ScatterPoint>,
    x: f64,
    y: f64,
    scale: [f64; 2],
) -> Option<&'a ScatterPoint> {
    let sx = if scale[0] > 0.0 { scale[0] } else { 1.0 };
    let sy = if scale[1] > 0.0 { scale[1] } else { 1.0 };
    points.into_iter().min_by(|a, b| {
        let da = ((a.sales - x) / sx).powi(2) + ((a.profit - y) / sy).powi(2);
        let db = ((b.sales - x) / sx).powi(2) + ((b.profit - y) / sy).powi(2);
        da.total_cmp(&db)
    })
}
