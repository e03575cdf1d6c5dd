//! Exact 2D geometry for edge adjacency.
//!
//! Purpose
//! - Provide the three value types the neighbour search is built on: `Vertex`,
//!   `Edge` and the closed `Polygon` loop.
//! - Equality is exact everywhere. Coordinates come from one shared input, so
//!   two polygons that share a boundary carry bit-identical vertices; there are
//!   no epsilons in this module and none should be added.
//!
//! Conventions
//! - A polygon of `L` vertices (closing vertex included) has `L - 1` edges.
//! - Edges compare without regard to direction: neighbours traverse a shared
//!   edge in opposite winding order.
//!
//! Code cross-refs: `Polygon::shares_edge`, `search::neighbours_of`

mod polygon;
mod types;

pub use polygon::{Polygon, PolygonError};
pub use types::{Edge, Vertex};
