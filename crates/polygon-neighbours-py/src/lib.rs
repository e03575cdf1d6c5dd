//! PyO3 bindings for `polygon_neighbours`.
//!
//! Notes
//! - Polygons arrive as lists of `(x, y)` tuples with the closing vertex
//!   repeated; nothing is closed or repaired on the Python side either.
//! - The GIL is released for the search itself.

mod common;

use common::{flatten_polygons, map_search_err, schedule_cfg};
use polygon_neighbours::api;
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Padded neighbour table: one row per test index, `-1` for "none"/padding.
#[pyfunction]
#[pyo3(signature = (polygons, test_indices, workers=None))]
fn find_neighbours(
    py: Python<'_>,
    polygons: Vec<Vec<(f64, f64)>>,
    test_indices: Vec<usize>,
    workers: Option<usize>,
) -> PyResult<Vec<Vec<i64>>> {
    let flat = flatten_polygons(polygons);
    let cfg = schedule_cfg(workers);
    let table = py
        .allow_threads(|| api::find_neighbours(&flat, test_indices, &cfg))
        .map_err(map_search_err)?;
    Ok(table.rows().map(<[i64]>::to_vec).collect())
}

/// `{test_index: [neighbours...]}`; isolated polygons map to `[-1]`.
#[pyfunction]
#[pyo3(signature = (polygons, test_indices, workers=None))]
fn neighbours_by_idx(
    py: Python<'_>,
    polygons: Vec<Vec<(f64, f64)>>,
    test_indices: Vec<usize>,
    workers: Option<usize>,
) -> PyResult<PyObject> {
    let flat = flatten_polygons(polygons);
    let cfg = schedule_cfg(workers);
    let rows = py
        .allow_threads(|| api::neighbours_by_index(&flat, test_indices, &cfg))
        .map_err(map_search_err)?;
    let dict = PyDict::new(py);
    for (index, row) in rows {
        dict.set_item(index, row)?;
    }
    Ok(dict.into())
}

#[pymodule]
fn polygon_tools_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(find_neighbours, m)?)?;
    m.add_function(wrap_pyfunction!(neighbours_by_idx, m)?)?;
    m.add("__version__", polygon_neighbours::VERSION)?;
    Ok(())
}
