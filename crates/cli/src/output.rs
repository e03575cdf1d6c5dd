//! Result emission: padded table (JSON/CSV/Parquet) or one file per test index.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use polygon_neighbours::search::NeighbourTable;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Table file format, picked from the output extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Csv,
    Parquet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") | None => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            Some(other) => bail!("unsupported output extension '.{other}' (json, csv, parquet)"),
        }
    }
}

#[derive(Serialize)]
struct TableDoc<'a> {
    test_indices: &'a [usize],
    width: usize,
    rows: Vec<&'a [i64]>,
}

#[derive(Serialize)]
struct RowDoc<'a> {
    test_index: usize,
    neighbours: &'a [i64],
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Columns `test_index, n_0 .. n_{width-1}`, all `i64`.
pub fn table_frame(table: &NeighbourTable) -> PolarsResult<DataFrame> {
    let mut columns = Vec::with_capacity(table.width() + 1);
    let tests: Vec<i64> = table.test_indices().iter().map(|&i| i as i64).collect();
    columns.push(Series::new("test_index".into(), tests));
    for j in 0..table.width() {
        let col: Vec<i64> = table.rows().map(|row| row[j]).collect();
        columns.push(Series::new(format!("n_{j}").as_str().into(), col));
    }
    DataFrame::new(columns)
}

/// Write the padded table to `path` in the format its extension names.
pub fn write_table(table: &NeighbourTable, path: &Path) -> Result<TableFormat> {
    let format = TableFormat::from_path(path)?;
    ensure_parent(path)?;
    match format {
        TableFormat::Json => {
            let doc = TableDoc {
                test_indices: table.test_indices(),
                width: table.width(),
                rows: table.rows().collect(),
            };
            fs::write(path, serde_json::to_vec_pretty(&doc)?)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        TableFormat::Csv => {
            let mut df = table_frame(table)?;
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
        }
        TableFormat::Parquet => {
            let mut df = table_frame(table)?;
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
    }
    tracing::info!(path = %path.display(), ?format, shape = ?table.shape(), "table_written");
    Ok(format)
}

/// Write `<dir>/neighbours_<slot>.json` per test index, unpadded (`[-1]` when isolated).
pub fn write_split(table: &NeighbourTable, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::with_capacity(table.test_indices().len());
    for (slot, &test_index) in table.test_indices().iter().enumerate() {
        let neighbours = table
            .unpadded(slot)
            .with_context(|| format!("missing row for slot {slot}"))?;
        let path = dir.join(format!("neighbours_{slot}.json"));
        let doc = RowDoc {
            test_index,
            neighbours,
        };
        fs::write(&path, serde_json::to_vec(&doc)?)
            .with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    tracing::info!(dir = %dir.display(), files = written.len(), "split_written");
    Ok(written)
}
