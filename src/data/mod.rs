/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────────┐
///   │ cache/loader │  parse file once per session → Arc<ReitDataset>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep rows whose ticker is in the Selection
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered view → reit_data_filtered.csv
///   └──────────┘
/// ```

pub mod cache;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
