//! One-call entry points over raw coordinates.
//!
//! Used by the Python binding and the CLI; both hand over flat interleaved
//! `x, y` lists and want either the padded table or per-index rows back.

pub use crate::search::{NeighbourTable, ScheduleCfg, SearchContext, SearchError};

use crate::search::run_search;

/// Validate, search and encode in one go.
///
/// `polygons[k]` is polygon `k` as `[x0, y0, x1, y1, ...]` with the closing
/// vertex repeated.
pub fn find_neighbours<P>(
    polygons: &[P],
    test_indices: Vec<usize>,
    cfg: &ScheduleCfg,
) -> Result<NeighbourTable, SearchError>
where
    P: AsRef<[f64]>,
{
    let ctx = SearchContext::from_xy(polygons, test_indices)?;
    let outcome = run_search(&ctx, cfg)?;
    NeighbourTable::encode(&ctx, outcome.results)
}

/// Like `find_neighbours`, but pairs each test index with its unpadded row.
///
/// Isolated polygons map to `[-1]`, same as in the table.
pub fn neighbours_by_index<P>(
    polygons: &[P],
    test_indices: Vec<usize>,
    cfg: &ScheduleCfg,
) -> Result<Vec<(usize, Vec<i64>)>, SearchError>
where
    P: AsRef<[f64]>,
{
    let table = find_neighbours(polygons, test_indices, cfg)?;
    Ok(table
        .test_indices()
        .iter()
        .enumerate()
        .filter_map(|(i, &index)| table.unpadded(i).map(|row| (index, row.to_vec())))
        .collect())
}
