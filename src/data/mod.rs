/// Data layer: record model, loading, and page selection.
///
/// Architecture:
/// ```text
///   pricelist.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, source order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  name query + 50-row window → Page
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
