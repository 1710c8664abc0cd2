/// Data layer: core types, sources, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///  remote .csv / local .csv .json .parquet
///        │
///        ▼
///   ┌──────────────────┐
///   │ source + loader   │  fetch & parse → SalesTable
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  fetch once, share Arc<SalesTable>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply per-dimension selection → filtered table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs + chart series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
