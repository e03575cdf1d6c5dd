use std::fmt;

use crate::geom::PolygonError;

/// Errors surfaced while building a search context or running a search.
///
/// Every variant is fatal for the run; there is no partial-result mode.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// Polygon at `position` in the input could not be built.
    MalformedPolygon {
        position: usize,
        source: PolygonError,
    },
    /// Test index at `slot` does not address a polygon.
    TestIndexOutOfRange {
        slot: usize,
        index: usize,
        n_polygons: usize,
    },
    /// Direct task call for a polygon the collection does not hold.
    UnknownPolygon { index: usize, n_polygons: usize },
    /// Test index at `slot` repeats the one at `first_slot`.
    DuplicateTestIndex {
        slot: usize,
        index: usize,
        first_slot: usize,
    },
    /// Encoder was handed a different number of results than test indices.
    ResultCountMismatch { expected: usize, got: usize },
    /// The worker pool could not be created.
    WorkerPool { reason: String },
    /// A worker panicked before finishing its tasks.
    WorkerPanicked { reason: String },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::MalformedPolygon { position, source } => {
                write!(f, "polygon {position} is malformed: {source}")
            }
            SearchError::TestIndexOutOfRange {
                slot,
                index,
                n_polygons,
            } => write!(
                f,
                "test index {index} (slot {slot}) is out of range for {n_polygons} polygons"
            ),
            SearchError::UnknownPolygon { index, n_polygons } => {
                write!(f, "polygon index {index} is out of range for {n_polygons} polygons")
            }
            SearchError::DuplicateTestIndex {
                slot,
                index,
                first_slot,
            } => write!(
                f,
                "test index {index} appears twice (slots {first_slot} and {slot})"
            ),
            SearchError::ResultCountMismatch { expected, got } => {
                write!(f, "expected {expected} neighbour results, got {got}")
            }
            SearchError::WorkerPool { reason } => {
                write!(f, "could not start worker pool: {reason}")
            }
            SearchError::WorkerPanicked { reason } => write!(f, "worker panicked: {reason}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::MalformedPolygon { source, .. } => Some(source),
            _ => None,
        }
    }
}
