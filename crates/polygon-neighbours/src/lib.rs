//! Edge-adjacency search over large polygon collections.
//!
//! For a chosen subset of polygons ("test indices") the crate lists every
//! other polygon of the same collection that shares a boundary edge with it.
//! Tests run independently on a fixed-size worker pool.
//!
//! Layout
//! - `geom`: `Vertex`, `Edge`, `Polygon` with exact, direction-free edge equality.
//! - `search`: immutable `SearchContext`, `neighbours_of` task, `run_search`
//!   scheduler, `NeighbourTable` encoder.
//! - `tiling`: reproducible quad grids with known adjacency.
//! - `api`: one-call entry points for bindings and the CLI.

pub mod api;
pub mod geom;
pub mod search;
pub mod tiling;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{find_neighbours, neighbours_by_index};
    pub use crate::geom::{Edge, Polygon, PolygonError, Vertex};
    pub use crate::search::{
        neighbours_of, run_search, NeighbourResult, NeighbourTable, ScheduleCfg, SearchContext,
        SearchError, SearchOutcome, NO_NEIGHBOURS,
    };
    pub use crate::tiling::{expected_neighbours, quad_tiling, GridCfg};
}
