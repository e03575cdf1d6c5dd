//! One neighbour task: a single test polygon against the whole collection.

use super::context::SearchContext;
use super::error::SearchError;

/// Row value meaning "no neighbours", also used as padding by the encoder.
pub const NO_NEIGHBOURS: i64 = -1;

/// Neighbours of one test polygon in ascending index order.
///
/// Never zero-length: an isolated polygon is the single-element row `[-1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighbourResult {
    row: Vec<i64>,
}

impl NeighbourResult {
    fn from_indices(indices: Vec<usize>) -> Self {
        if indices.is_empty() {
            return Self {
                row: vec![NO_NEIGHBOURS],
            };
        }
        Self {
            row: indices.into_iter().map(|j| j as i64).collect(),
        }
    }

    /// The row as emitted, sentinel included.
    #[inline]
    pub fn row(&self) -> &[i64] {
        &self.row
    }

    #[inline]
    pub fn into_row(self) -> Vec<i64> {
        self.row
    }

    /// Neighbour indices only; empty for an isolated polygon.
    pub fn neighbours(&self) -> impl Iterator<Item = usize> + '_ {
        self.row
            .iter()
            .filter(|&&j| j != NO_NEIGHBOURS)
            .map(|&j| j as usize)
    }

    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.row == [NO_NEIGHBOURS]
    }
}

/// Scan the whole collection for polygons sharing an edge with polygon `index`.
///
/// `index` itself is skipped by position, so a polygon is never compared with
/// itself. The scan does not stop early: every neighbour is reported.
pub fn neighbours_of(ctx: &SearchContext, index: usize) -> Result<NeighbourResult, SearchError> {
    let test = ctx
        .polygon(index)
        .ok_or(SearchError::UnknownPolygon {
            index,
            n_polygons: ctx.n_polygons(),
        })?;
    let found: Vec<usize> = ctx
        .polygons()
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != index && test.shares_edge(other))
        .map(|(j, _)| j)
        .collect();
    Ok(NeighbourResult::from_indices(found))
}
