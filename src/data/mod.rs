/// Data layer: tabular core, per-dataset loaders, and user-driven filters.
///
/// Architecture:
/// ```text
///  data/*.csv
///      │
///      ▼
///  ┌──────────┐
///  │  loader   │  one loader per dataset → Table / Hierarchy / Graph
///  └──────────┘
///      │
///      ▼
///  ┌──────────┐
///  │  filter   │  country / year selections → filtered Table
///  └──────────┘
///      │
///      ▼
///   chart JSON (records array, nested tree, or {nodes, edges})
/// ```
///
/// Every structure is recomputed from its source file per invocation; no
/// loader depends on another's output.

pub mod filter;
pub mod graph;
pub mod hierarchy;
pub mod loader;
pub mod model;
