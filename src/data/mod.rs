/// Data layer: core types, loading, filtering, statistics and comparison.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, typed columns, read-only
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐           ┌──────────┐
///   │  filter   │  → View   │ compare   │  two models → side-by-side rows
///   └──────────┘           └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  count / mean / median / adoption / correlation
///   └──────────┘
/// ```

pub mod compare;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
