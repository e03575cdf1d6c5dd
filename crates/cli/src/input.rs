//! Input loading: keyed JSON container or CSV vertex table.
//!
//! JSON container (mirrors the keyed array archive the search was first fed from):
//! `{"n_test", "test_indices", "n_polygons", "polygons": [{"len", "xy"}]}` where
//! `xy` holds `len` interleaved `x, y` pairs, closing vertex included.
//!
//! CSV vertex table: columns `polygon, x, y`, one row per vertex in loop order;
//! polygon ids run 0, 1, 2, ... in contiguous blocks.

use polars::prelude::*;
use polygon_neighbours::geom::Polygon;
use polygon_neighbours::search::{SearchContext, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One polygon of the JSON container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    pub len: usize,
    pub xy: Vec<f64>,
}

/// The JSON input container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputContainer {
    pub n_test: usize,
    pub test_indices: Vec<usize>,
    pub n_polygons: usize,
    pub polygons: Vec<PolygonRecord>,
}

impl InputContainer {
    pub fn from_polygons(polygons: &[Polygon], test_indices: Vec<usize>) -> Self {
        let polygons: Vec<PolygonRecord> = polygons
            .iter()
            .map(|p| PolygonRecord {
                len: p.vertex_count(),
                xy: p.vertices().iter().flat_map(|v| [v.x(), v.y()]).collect(),
            })
            .collect();
        Self {
            n_test: test_indices.len(),
            test_indices,
            n_polygons: polygons.len(),
            polygons,
        }
    }

    /// Cross-check the declared counts; they are part of the format.
    fn check_counts(&self) -> Result<(), String> {
        if self.n_test != self.test_indices.len() {
            return Err(format!(
                "n_test is {} but test_indices holds {}",
                self.n_test,
                self.test_indices.len()
            ));
        }
        if self.n_polygons != self.polygons.len() {
            return Err(format!(
                "n_polygons is {} but polygons holds {}",
                self.n_polygons,
                self.polygons.len()
            ));
        }
        for (position, record) in self.polygons.iter().enumerate() {
            if record.xy.len() != 2 * record.len {
                return Err(format!(
                    "polygon {position}: len is {} but xy holds {} values",
                    record.len,
                    record.xy.len()
                ));
            }
        }
        Ok(())
    }
}

/// Why an input could not become a `SearchContext`.
#[derive(Debug)]
pub enum LoadError {
    /// The input path does not exist.
    NotFound { path: PathBuf },
    /// The input exists but could not be read.
    Unreadable { path: PathBuf, source: io::Error },
    /// The bytes are not a valid container or vertex table.
    Parse { path: PathBuf, reason: String },
    /// Well-formed container with invalid content (unclosed polygon, bad index).
    Invalid(SearchError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { path } => write!(f, "input not found: {}", path.display()),
            LoadError::Unreadable { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            LoadError::Parse { path, reason } => {
                write!(f, "cannot parse {}: {reason}", path.display())
            }
            LoadError::Invalid(err) => write!(f, "invalid input: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Unreadable { source, .. } => Some(source),
            LoadError::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SearchError> for LoadError {
    fn from(err: SearchError) -> Self {
        LoadError::Invalid(err)
    }
}

/// Load `path` by extension (`.csv` vertex table, anything else JSON container).
///
/// `tests` replaces the container's test indices; for a vertex table it
/// defaults to every polygon.
pub fn load_context(path: &Path, tests: Option<Vec<usize>>) -> Result<SearchContext, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        let polygons = read_vertex_table(path)?;
        let tests = tests.unwrap_or_else(|| (0..polygons.len()).collect());
        return Ok(SearchContext::from_xy(&polygons, tests)?);
    }

    let mut container = read_container(path)?;
    if let Some(tests) = tests {
        container.n_test = tests.len();
        container.test_indices = tests;
    }
    let polygons: Vec<Vec<f64>> = container.polygons.into_iter().map(|p| p.xy).collect();
    Ok(SearchContext::from_xy(&polygons, container.test_indices)?)
}

/// Read and count-check a JSON container.
pub fn read_container(path: &Path) -> Result<InputContainer, LoadError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let parse_err = |reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let container: InputContainer =
        serde_json::from_slice(&bytes).map_err(|err| parse_err(err.to_string()))?;
    container.check_counts().map_err(parse_err)?;
    Ok(container)
}

/// Group a `polygon, x, y` table into flat coordinate lists, one per polygon.
fn read_vertex_table(path: &Path) -> Result<Vec<Vec<f64>>, LoadError> {
    let parse_err = |reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let schema = Schema::from_iter([
        Field::new("polygon".into(), DataType::Int64),
        Field::new("x".into(), DataType::Float64),
        Field::new("y".into(), DataType::Float64),
    ]);
    let df = LazyCsvReader::new(path)
        .with_dtype_overwrite(Some(Arc::new(schema)))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|err| parse_err(err.to_string()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "vertex_table");

    let column = |name: &str, dtype: DataType| -> PolarsResult<Series> {
        df.column(name)?.cast(&dtype)
    };
    let ids = column("polygon", DataType::Int64).map_err(|err| parse_err(err.to_string()))?;
    let xs = column("x", DataType::Float64).map_err(|err| parse_err(err.to_string()))?;
    let ys = column("y", DataType::Float64).map_err(|err| parse_err(err.to_string()))?;
    let ids = ids.i64().map_err(|err| parse_err(err.to_string()))?;
    let xs = xs.f64().map_err(|err| parse_err(err.to_string()))?;
    let ys = ys.f64().map_err(|err| parse_err(err.to_string()))?;

    let mut polygons: Vec<Vec<f64>> = Vec::new();
    for (row, ((id, x), y)) in ids.into_iter().zip(xs).zip(ys).enumerate() {
        let (id, x, y) = match (id, x, y) {
            (Some(id), Some(x), Some(y)) => (id, x, y),
            _ => return Err(parse_err(format!("row {row} has a missing value"))),
        };
        let current = polygons.len() as i64 - 1;
        if id == current + 1 {
            polygons.push(Vec::new());
        } else if id != current {
            return Err(parse_err(format!(
                "row {row}: polygon id {id} breaks the contiguous 0, 1, 2, ... order"
            )));
        }
        if let Some(coords) = polygons.last_mut() {
            coords.extend([x, y]);
        }
    }
    Ok(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polygon_neighbours::geom::PolygonError;
    use tempfile::tempdir;

    const TWO_TRIANGLES: &str = r#"{
        "n_test": 2, "test_indices": [1, 0],
        "n_polygons": 2,
        "polygons": [
            {"len": 4, "xy": [0, 0, 1, 0, 0, 1, 0, 0]},
            {"len": 4, "xy": [1, 0, 1, 1, 0, 1, 1, 0]}
        ]
    }"#;

    #[test]
    fn missing_input_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_context(&dir.path().join("nope.json"), None).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().starts_with("input not found"));
    }

    #[test]
    fn json_container_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.json");
        fs::write(&path, TWO_TRIANGLES).unwrap();
        let ctx = load_context(&path, None).unwrap();
        assert_eq!(ctx.n_polygons(), 2);
        assert_eq!(ctx.test_indices(), &[1, 0]);
        let ctx = load_context(&path, Some(vec![0])).unwrap();
        assert_eq!(ctx.test_indices(), &[0]);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_context(&path, None),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn count_mismatch_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.json");
        fs::write(&path, TWO_TRIANGLES.replace("\"n_test\": 2", "\"n_test\": 3")).unwrap();
        let err = load_context(&path, None).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "{err}");
        fs::write(&path, TWO_TRIANGLES.replacen("\"len\": 4", "\"len\": 5", 1)).unwrap();
        let err = load_context(&path, None).unwrap_err();
        assert!(err.to_string().contains("polygon 0"), "{err}");
    }

    #[test]
    fn unclosed_polygon_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.json");
        let text = TWO_TRIANGLES.replace("[1, 0, 1, 1, 0, 1, 1, 0]", "[1, 0, 1, 1, 0, 1, 2, 0]");
        fs::write(&path, text).unwrap();
        match load_context(&path, None) {
            Err(LoadError::Invalid(SearchError::MalformedPolygon { position, source })) => {
                assert_eq!(position, 1);
                assert!(matches!(source, PolygonError::NotClosed { .. }));
            }
            other => panic!("expected MalformedPolygon, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_test_index_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.json");
        fs::write(&path, TWO_TRIANGLES).unwrap();
        assert!(matches!(
            load_context(&path, Some(vec![0, 2])),
            Err(LoadError::Invalid(SearchError::TestIndexOutOfRange { index: 2, .. }))
        ));
    }

    #[test]
    fn vertex_table_groups_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(
            &path,
            "polygon,x,y\n0,0,0\n0,1,0\n0,0,1\n0,0,0\n1,1,0\n1,1,1\n1,0,1\n1,1,0\n",
        )
        .unwrap();
        let ctx = load_context(&path, None).unwrap();
        assert_eq!(ctx.n_polygons(), 2);
        assert_eq!(ctx.test_indices(), &[0, 1]);
        assert!(ctx.polygons()[0].shares_edge(&ctx.polygons()[1]));
    }

    #[test]
    fn vertex_table_reads_late_fractional_coordinates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        let mut text = String::from("polygon,x,y\n");
        for id in 0..30 {
            for (x, y) in [(0, 0), (1, 0), (0, 1), (0, 0)] {
                text.push_str(&format!("{id},{},{}\n", x + 2 * id, y));
            }
        }
        for (x, y) in [(0.5, 0.5), (1.5, 0.5), (0.5, 1.5), (0.5, 0.5)] {
            text.push_str(&format!("30,{x},{y}\n"));
        }
        fs::write(&path, text).unwrap();
        let ctx = load_context(&path, None).unwrap();
        assert_eq!(ctx.n_polygons(), 31);
        assert_eq!(ctx.polygons()[30].vertex_count(), 4);
        assert_eq!(ctx.polygons()[30].vertices()[1].x(), 1.5);
    }

    #[test]
    fn vertex_table_rejects_gaps_in_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "polygon,x,y\n0,0,0\n0,0,0\n2,1,1\n2,1,1\n").unwrap();
        assert!(matches!(
            load_context(&path, None),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn container_roundtrips_polygons() {
        let p = Polygon::from_xy(&[0.5, 0.0, 1.0, 0.0, 0.0, 1.0, 0.5, 0.0]).unwrap();
        let c = InputContainer::from_polygons(&[p], vec![0]);
        assert_eq!(c.n_polygons, 1);
        assert_eq!(c.polygons[0].len, 4);
        assert_eq!(c.polygons[0].xy[..2], [0.5, 0.0]);
        assert!(c.check_counts().is_ok());
    }
}
