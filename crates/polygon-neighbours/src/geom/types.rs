//! Vertex and edge value types.
//!
//! - `Vertex`: a point in R², stored as `nalgebra::Vector2<f64>`.
//! - `Edge`: the undirected segment between two consecutive polygon vertices.

use nalgebra::Vector2;
use std::fmt;

/// Point in the plane. Equality is component-wise `f64` equality, no tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex(Vector2<f64>);

impl Vertex {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self(Vector2::new(x, y))
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }
}

impl From<(f64, f64)> for Vertex {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x(), self.y())
    }
}

/// Segment between two vertices, compared as an unordered pair.
///
/// `Edge::new(a, b) == Edge::new(b, a)` always holds; two polygons sharing a
/// boundary list that boundary in opposite orders.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    start: Vertex,
    end: Vertex,
}

impl Edge {
    #[inline]
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }
    #[inline]
    pub fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Vertex::new(x0, y0), Vertex::new(x1, y1))
    }
    #[inline]
    pub fn start(&self) -> Vertex {
        self.start
    }
    #[inline]
    pub fn end(&self) -> Vertex {
        self.end
    }
    /// Same segment traversed the other way.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

impl PartialEq for Edge {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge: ({},{}),({},{})",
            self.start.x(),
            self.start.y(),
            self.end.x(),
            self.end.y()
        )
    }
}
