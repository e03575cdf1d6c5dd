//! Jittered quad tilings with a known adjacency structure.
//!
//! Purpose
//! - Generate realistic, reproducible collections for tests, benches and the
//!   CLI `generate` command: a `rows × cols` grid of quadrilaterals whose
//!   shared corners are jittered once and reused by every incident quad, so
//!   shared edges stay bit-identical.
//!
//! Model
//! - Lattice point `(r, c)` sits at `(c, r) * cell` plus a uniform offset of at
//!   most `jitter * cell` per axis; `jitter` is clamped to `[0, 0.49]` so quads
//!   stay simple.
//! - Quad `r * cols + c` is the CCW loop over lattice points
//!   `(r,c) → (r,c+1) → (r+1,c+1) → (r+1,c) → (r,c)`.
//! - Edge neighbours are exactly the rook neighbours in the grid; diagonal
//!   quads only share a corner.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{Polygon, Vertex};

/// Grid tiling configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCfg {
    pub rows: usize,
    pub cols: usize,
    /// Lattice spacing.
    pub cell: f64,
    /// Corner jitter as a fraction of `cell`. Clamped to [0, 0.49].
    pub jitter: f64,
}

impl Default for GridCfg {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            cell: 1.0,
            jitter: 0.25,
        }
    }
}

impl GridCfg {
    #[inline]
    pub fn n_quads(&self) -> usize {
        self.rows * self.cols
    }
}

/// Draw a tiling; same `(cfg, seed)` gives bit-identical polygons.
pub fn quad_tiling(cfg: GridCfg, seed: u64) -> Vec<Polygon> {
    if cfg.rows == 0 || cfg.cols == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let amp = cfg.jitter.clamp(0.0, 0.49) * cfg.cell;
    let stride = cfg.cols + 1;
    let lattice: Vec<Vertex> = (0..=cfg.rows)
        .flat_map(|r| (0..=cfg.cols).map(move |c| (r, c)))
        .map(|(r, c)| {
            let dx = (rng.gen::<f64>() * 2.0 - 1.0) * amp;
            let dy = (rng.gen::<f64>() * 2.0 - 1.0) * amp;
            Vertex::new(c as f64 * cfg.cell + dx, r as f64 * cfg.cell + dy)
        })
        .collect();
    let at = |r: usize, c: usize| lattice[r * stride + c];

    let mut quads = Vec::with_capacity(cfg.n_quads());
    for r in 0..cfg.rows {
        for c in 0..cfg.cols {
            let corner = at(r, c);
            quads.push(Polygon::from_closed_unchecked(vec![
                corner,
                at(r, c + 1),
                at(r + 1, c + 1),
                at(r + 1, c),
                corner,
            ]));
        }
    }
    quads
}

/// Edge neighbours of quad `index` in a `cfg` tiling, ascending.
pub fn expected_neighbours(cfg: GridCfg, index: usize) -> Vec<usize> {
    let (r, c) = (index / cfg.cols, index % cfg.cols);
    let mut out = Vec::with_capacity(4);
    if r > 0 {
        out.push(index - cfg.cols);
    }
    if c > 0 {
        out.push(index - 1);
    }
    if c + 1 < cfg.cols {
        out.push(index + 1);
    }
    if r + 1 < cfg.rows {
        out.push(index + cfg.cols);
    }
    out
}
