use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::cache::DataCache;
use crate::data::filter::{Selection, default_selection};
use crate::data::model::{Dimension, SalesTable};
use crate::data::source::DataSource;
use crate::error::{DashboardError, DashboardResult};
use crate::pipeline::{self, DashboardView};

/// Dimensions offered as sidebar filters.
pub const FILTER_DIMENSIONS: [Dimension; 2] = [Dimension::Region, Dimension::Category];

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized source of the sales table.
    pub cache: DataCache,

    /// Loaded table (None if loading failed).
    pub table: Option<Arc<SalesTable>>,

    /// Per-dimension filter selections.
    pub selection: Selection,

    /// Outcome of the latest run; recomputed after every filter change.
    pub view: DashboardResult<DashboardView>,

    pub region_colors: ColorMap,
    pub category_colors: ColorMap,

    /// Regions pre-selected when a table is loaded.
    pub default_region_count: usize,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create the state and perform the initial load.
    pub fn new(cache: DataCache, default_region_count: usize) -> Self {
        let mut state = Self {
            cache,
            table: None,
            selection: Selection::new(),
            view: Err(DashboardError::EmptySelection),
            region_colors: ColorMap::default(),
            category_colors: ColorMap::default(),
            default_region_count,
            status_message: None,
        };
        match state.cache.load() {
            Ok(table) => state.set_table(table),
            Err(e) => state.view = Err(e),
        }
        state
    }

    /// Ingest a newly loaded table, initialise filters and colours.
    fn set_table(&mut self, table: Arc<SalesTable>) {
        self.selection = default_selection(&table, self.default_region_count);
        self.region_colors = ColorMap::new(table.distinct(Dimension::Region));
        self.category_colors = ColorMap::new(table.distinct(Dimension::Category));
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Switch to another source.  The current table stays if the new one
    /// fails to load.
    pub fn set_source(&mut self, source: Box<dyn DataSource>) {
        let mut cache = DataCache::new(source);
        match cache.load() {
            Ok(table) => {
                self.cache = cache;
                self.set_table(table);
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Re-run the pipeline after a filter change.  The table comes from the
    /// cache, so only the very first run ever fetched.
    pub fn refilter(&mut self) {
        if self.cache.is_loaded() {
            self.view = pipeline::run(&mut self.cache, &self.selection);
        }
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        let selected = self.selection.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(table) = &self.table {
            let all_vals: BTreeSet<String> = table.distinct(dim).iter().cloned().collect();
            self.selection.insert(dim, all_vals);
            self.refilter();
        }
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.insert(dim, BTreeSet::new());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cache::tests::{CountingSource, counting_cache};

    #[test]
    fn initial_load_applies_default_selection() {
        let (cache, _) = counting_cache(false);
        let state = AppState::new(cache, 3);

        let view = state.view.as_ref().unwrap();
        // South is the fourth region and starts deselected.
        assert_eq!(view.table.len(), 3);
        assert_eq!(state.selection[&Dimension::Region].len(), 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn load_failure_is_kept_as_view_error() {
        let (cache, _) = counting_cache(true);
        let state = AppState::new(cache, 3);

        assert!(state.table.is_none());
        assert!(matches!(state.view, Err(DashboardError::DataLoad { .. })));
    }

    #[test]
    fn deselecting_everything_yields_empty_selection() {
        let (cache, calls) = counting_cache(false);
        let mut state = AppState::new(cache, 3);

        state.select_none(Dimension::Category);
        assert_eq!(state.view, Err(DashboardError::EmptySelection));

        state.toggle_filter_value(Dimension::Category, "Furniture");
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.kpis.total_sales, 100.0);

        state.select_all(Dimension::Region);
        assert_eq!(state.view.as_ref().unwrap().table.len(), 2);

        state.toggle_filter_value(Dimension::Category, "Furniture");
        assert_eq!(state.view, Err(DashboardError::EmptySelection));

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failed_source_switch_keeps_current_table() {
        let (cache, _) = counting_cache(false);
        let mut state = AppState::new(cache, 3);

        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        state.set_source(Box::new(CountingSource {
            calls: calls.clone(),
            fail: true,
        }));

        assert_eq!(calls.get(), 1);
        assert!(state.table.is_some());
        assert!(state.view.is_ok());
        assert!(state.status_message.unwrap().contains("connection refused"));
    }
}
