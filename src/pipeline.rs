use crate::data::aggregate::{
    CategorySales, KpiSnapshot, ScatterPoint, aggregate, sales_by_category, scatter_points,
};
use crate::data::cache::DataCache;
use crate::data::filter::{Selection, filter};
use crate::data::model::SalesTable;
use crate::error::{DashboardError, DashboardResult};

// ---------------------------------------------------------------------------
// One dashboard run: load → filter → aggregate → chart data
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs for one filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub table: SalesTable,
    pub kpis: KpiSnapshot,
    pub bars: Vec<CategorySales>,
    pub scatter: Vec<ScatterPoint>,
    /// Largest quantity in `table`, used to scale scatter markers.
    pub max_quantity: u32,
}

/// Filter an already loaded table and derive KPIs and chart series.
///
/// An empty source is reported as [`DashboardError::EmptySource`] and an
/// empty result as [`DashboardError::EmptySelection`], so the caller never
/// aggregates or charts nothing.
pub fn build_view(table: &SalesTable, selection: &Selection) -> DashboardResult<DashboardView> {
    if table.is_empty() {
        return Err(DashboardError::EmptySource);
    }

    let filtered = filter(table, selection);
    log::debug!("Selection kept {} of {} records", filtered.len(), table.len());

    if filtered.is_empty() {
        return Err(DashboardError::EmptySelection);
    }

    let kpis = aggregate(&filtered);
    let bars = sales_by_category(&filtered);
    let scatter = scatter_points(&filtered);
    let max_quantity = filtered
        .records
        .iter()
        .map(|r| r.quantity)
        .max()
        .unwrap_or(0);

    Ok(DashboardView {
        table: filtered,
        kpis,
        bars,
        scatter,
        max_quantity,
    })
}

/// Full run against the cache.  Only the first call fetches.
pub fn run(cache: &mut DataCache, selection: &Selection) -> DashboardResult<DashboardView> {
    let table = cache.load()?;
    build_view(&table, selection)
}
