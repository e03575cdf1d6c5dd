use std::fmt;

use super::types::{Edge, Vertex};

/// Reasons a vertex sequence cannot become a `Polygon`.
#[derive(Clone, Debug, PartialEq)]
pub enum PolygonError {
    /// No vertices at all.
    Empty,
    /// First and last vertex differ; polygons are never closed implicitly.
    NotClosed { first: Vertex, last: Vertex },
    /// Interleaved `x, y` input with a dangling coordinate.
    OddCoordinateCount { len: usize },
}

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonError::Empty => write!(f, "polygon has no vertices"),
            PolygonError::NotClosed { first, last } => write!(
                f,
                "polygon is not closed (first vertex {first} != last vertex {last})"
            ),
            PolygonError::OddCoordinateCount { len } => write!(
                f,
                "interleaved coordinates must come in x/y pairs, got {len} values"
            ),
        }
    }
}

impl std::error::Error for PolygonError {}

/// Closed vertex loop: `vertices[0] == vertices[len - 1]`.
///
/// The invariant is checked once in `new`; every `Polygon` in existence is closed.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vertex>) -> Result<Self, PolygonError> {
        let (first, last) = match (vertices.first(), vertices.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(PolygonError::Empty),
        };
        if first != last {
            return Err(PolygonError::NotClosed { first, last });
        }
        Ok(Self { vertices })
    }

    /// Caller guarantees the loop is closed.
    pub(crate) fn from_closed_unchecked(vertices: Vec<Vertex>) -> Self {
        debug_assert!(vertices.first().is_some() && vertices.first() == vertices.last());
        Self { vertices }
    }

    /// Build from a flat `[x0, y0, x1, y1, ...]` slice.
    pub fn from_xy(xy: &[f64]) -> Result<Self, PolygonError> {
        if xy.len() % 2 != 0 {
            return Err(PolygonError::OddCoordinateCount { len: xy.len() });
        }
        Self::new(
            xy.chunks_exact(2)
                .map(|p| Vertex::new(p[0], p[1]))
                .collect(),
        )
    }

    /// Number of vertices, closing vertex included.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.vertices.len() - 1
    }

    #[inline]
    pub fn vertex(&self, idx: usize) -> Option<Vertex> {
        self.vertices.get(idx).copied()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Edges between consecutive vertices, in loop order. Derived on demand.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices.windows(2).map(|w| Edge::new(w[0], w[1]))
    }

    /// True iff some edge of `self` equals (in either direction) some edge of `other`.
    ///
    /// O(E1·E2) pair scan, returns on the first match. Symmetric in its arguments.
    pub fn shares_edge(&self, other: &Polygon) -> bool {
        let theirs: Vec<Edge> = other.edges().collect();
        self.edges().any(|mine| theirs.iter().any(|e| mine == *e))
    }
}
