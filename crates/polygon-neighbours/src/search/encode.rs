//! Rectangular output table.

use super::context::SearchContext;
use super::error::SearchError;
use super::task::{NeighbourResult, NO_NEIGHBOURS};

/// Neighbour rows padded with `-1` to a common width, row-major.
///
/// Row `i` belongs to `test_indices[i]`. `width` is the longest result row,
/// so it is at least 1 whenever there is a row (isolated polygons emit `[-1]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighbourTable {
    test_indices: Vec<usize>,
    lengths: Vec<usize>,
    width: usize,
    cells: Vec<i64>,
}

impl NeighbourTable {
    /// Assemble `results` (one per test index, in test-index order).
    ///
    /// Pure reshaping. A result count that differs from the number of test
    /// indices means the results do not belong to `ctx`.
    pub fn encode(ctx: &SearchContext, results: Vec<NeighbourResult>) -> Result<Self, SearchError> {
        if results.len() != ctx.n_tests() {
            return Err(SearchError::ResultCountMismatch {
                expected: ctx.n_tests(),
                got: results.len(),
            });
        }
        let width = results.iter().map(|r| r.row().len()).max().unwrap_or(0);
        let mut lengths = Vec::with_capacity(results.len());
        let mut cells = Vec::with_capacity(results.len() * width);
        for result in results {
            let row = result.into_row();
            lengths.push(row.len());
            let pad = width - row.len();
            cells.extend(row);
            cells.extend(std::iter::repeat(NO_NEIGHBOURS).take(pad));
        }
        Ok(Self {
            test_indices: ctx.test_indices().to_vec(),
            lengths,
            width,
            cells,
        })
    }

    /// `(rows, width)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.test_indices.len(), self.width)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn test_indices(&self) -> &[usize] {
        &self.test_indices
    }

    /// Padded row `i`.
    pub fn row(&self, i: usize) -> Option<&[i64]> {
        if i >= self.test_indices.len() {
            return None;
        }
        Some(&self.cells[i * self.width..(i + 1) * self.width])
    }

    /// Row `i` as its task produced it: no padding, but `[-1]` when isolated.
    pub fn unpadded(&self, i: usize) -> Option<&[i64]> {
        let len = *self.lengths.get(i)?;
        self.row(i).map(|row| &row[..len])
    }

    /// Padded rows in test-index order.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> + '_ {
        (0..self.test_indices.len()).filter_map(move |i| self.row(i))
    }

    /// Flat row-major cells.
    #[inline]
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }
}
