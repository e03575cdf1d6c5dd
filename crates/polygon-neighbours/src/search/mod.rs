//! Neighbour search: immutable context, per-polygon task, scheduler, encoder.
//!
//! Purpose
//! - For each test index, list every other polygon in the collection that
//!   shares an edge with it, ascending, or `[-1]` when there is none.
//!
//! Flow
//! - `SearchContext::new` validates the polygons and test indices once.
//! - `run_search` fans one `neighbours_of` task per test index out to a
//!   fixed-size rayon pool and joins them; results stay keyed by the position
//!   of the test index, never by completion order.
//! - `NeighbourTable::encode` pads the rows into a rectangular `i64` table.
//!
//! Concurrency
//! - Tasks share `&SearchContext` and nothing else; each owns its result `Vec`.
//! - `ScheduleCfg::workers == 1` is the sequential mode; there is no separate
//!   code path for it.
//!
//! Code cross-refs: `geom::Polygon::shares_edge`

mod context;
mod encode;
mod error;
mod schedule;
mod task;

pub use context::SearchContext;
pub use encode::NeighbourTable;
pub use error::SearchError;
pub use schedule::{hardware_concurrency, run_search, worker_count, ScheduleCfg, SearchOutcome};
pub use task::{neighbours_of, NeighbourResult, NO_NEIGHBOURS};

#[cfg(test)]
mod tests;
