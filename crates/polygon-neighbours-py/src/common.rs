use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use polygon_neighbours::search::{ScheduleCfg, SearchError};

/// Python exception class per failure kind.
pub fn map_search_err(err: SearchError) -> PyErr {
    match err {
        SearchError::MalformedPolygon { .. } | SearchError::DuplicateTestIndex { .. } => {
            PyValueError::new_err(err.to_string())
        }
        SearchError::TestIndexOutOfRange { .. } | SearchError::UnknownPolygon { .. } => {
            PyIndexError::new_err(err.to_string())
        }
        SearchError::ResultCountMismatch { .. }
        | SearchError::WorkerPool { .. }
        | SearchError::WorkerPanicked { .. } => {
            PyRuntimeError::new_err(err.to_string())
        }
    }
}

/// `[(x, y), ...]` loops → flat interleaved coordinate lists.
pub fn flatten_polygons(polygons: Vec<Vec<(f64, f64)>>) -> Vec<Vec<f64>> {
    polygons
        .into_iter()
        .map(|loop_| loop_.into_iter().flat_map(|(x, y)| [x, y]).collect())
        .collect()
}

pub fn schedule_cfg(workers: Option<usize>) -> ScheduleCfg {
    ScheduleCfg::with_workers(workers.unwrap_or(0))
}
