use std::sync::Arc;

use super::model::{Dimension, SalesTable};
use super::source::DataSource;
use crate::error::{DashboardError, DashboardResult};

// ---------------------------------------------------------------------------
// Memoized loader
// ---------------------------------------------------------------------------

/// Holds a data source and the table it produced, if any.
///
/// The first successful [`DataCache::load`] fetches; every later call returns
/// the same shared table.  Failed fetches are not remembered.  The cache lives
/// as long as the application state that owns it.
pub struct DataCache {
    source: Box<dyn DataSource>,
    table: Option<Arc<SalesTable>>,
}

impl DataCache {
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            table: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    pub fn load(&mut self) -> DashboardResult<Arc<SalesTable>> {
        if let Some(table) = &self.table {
            log::debug!("Cache hit for {}", self.source.describe());
            return Ok(Arc::clone(table));
        }

        let origin = self.source.describe();
        log::info!("Fetching sales data from {origin}");

        match self.source.fetch() {
            Ok(table) => {
                log::info!(
                    "Loaded {} records ({} regions, {} categories)",
                    table.len(),
                    table.distinct(Dimension::Region).len(),
                    table.distinct(Dimension::Category).len()
                );
                let table = Arc::new(table);
                self.table = Some(Arc::clone(&table));
                Ok(table)
            }
            Err(e) => {
                log::error!("Failed to load {origin}: {e:#}");
                Err(DashboardError::DataLoad {
                    origin,
                    message: format!("{e:#}"),
                })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use anyhow::bail;

    use super::*;
    use crate::data::model::record;

    /// In-memory source that counts fetches and can be told to fail.
    pub(crate) struct CountingSource {
        pub calls: Rc<Cell<usize>>,
        pub fail: bool,
    }

    impl DataSource for CountingSource {
        fn describe(&self) -> String {
            "memory://sales".to_string()
        }

        fn fetch(&self) -> anyhow::Result<SalesTable> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                bail!("connection refused");
            }
            Ok(SalesTable::from_records(vec![
                record("West", "Furniture", "Chairs", 100.0, 20.0, 2),
                record("East", "Technology", "Phones", 200.0, -10.0, 3),
                record("Central", "Office Supplies", "Paper", 50.0, 5.0, 1),
                record("South", "Furniture", "Tables", 80.0, -30.0, 4),
            ]))
        }
    }

    pub(crate) fn counting_cache(fail: bool) -> (DataCache, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let source = CountingSource {
            calls: Rc::clone(&calls),
            fail,
        };
        (DataCache::new(Box::new(source)), calls)
    }

    #[test]
    fn second_load_is_a_cache_hit() {
        let (mut cache, calls) = counting_cache(false);
        assert!(!cache.is_loaded());

        let first = cache.load().unwrap();
        let second = cache.load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(calls.get(), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn failure_surfaces_as_data_load_error() {
        let (mut cache, calls) = counting_cache(true);

        let err = cache.load().unwrap_err();
        match err {
            DashboardError::DataLoad { origin, message } => {
                assert_eq!(origin, "memory://sales");
                assert!(message.contains("connection refused"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!cache.is_loaded());
        assert_eq!(calls.get(), 1);
    }
}
