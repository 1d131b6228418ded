/// Data layer: core types, loading, selection, and persistence.
///
/// Architecture:
/// ```text
///  combined_experiments.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ExperimentSet (+ dropped-row report)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ExperimentSet │  similarity / repulsive rows, sorted by η
///   └──────────────┘
///        │
///        ▼
///   ┌────────────┐      ┌──────────┐
///   │ selection   │ ←──→ │ persist   │  SelectionSet ⇄ `etas` query string
///   └────────────┘      └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod persist;
pub mod selection;
