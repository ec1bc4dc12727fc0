/// Data layer: the table model and the cleaning pipeline.
///
/// Architecture:
/// ```text
///   region .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (typed columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop all-missing columns, mean-fill numeric gaps
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  outlier  │  z-score mask → retained rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  union-concat per-region tables (batch only)
///   └──────────┘
/// ```

pub mod aggregate;
pub mod clean;
pub mod error;
pub mod loader;
pub mod model;
pub mod outlier;
pub mod schema;
pub mod stats;
