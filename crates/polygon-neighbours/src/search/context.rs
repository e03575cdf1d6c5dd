//! Read-only input of one search run.

use std::collections::HashMap;

use super::error::SearchError;
use crate::geom::Polygon;

/// Polygons plus the indices to test, validated once and then frozen.
///
/// Tasks receive `&SearchContext`; there is no interior mutability, so sharing
/// across the worker pool needs no locking.
#[derive(Clone, Debug)]
pub struct SearchContext {
    polygons: Vec<Polygon>,
    test_indices: Vec<usize>,
}

impl SearchContext {
    /// Rejects out-of-range and repeated test indices.
    pub fn new(polygons: Vec<Polygon>, test_indices: Vec<usize>) -> Result<Self, SearchError> {
        let n_polygons = polygons.len();
        let mut seen: HashMap<usize, usize> = HashMap::with_capacity(test_indices.len());
        for (slot, &index) in test_indices.iter().enumerate() {
            if index >= n_polygons {
                return Err(SearchError::TestIndexOutOfRange {
                    slot,
                    index,
                    n_polygons,
                });
            }
            if let Some(&first_slot) = seen.get(&index) {
                return Err(SearchError::DuplicateTestIndex {
                    slot,
                    index,
                    first_slot,
                });
            }
            seen.insert(index, slot);
        }
        Ok(Self {
            polygons,
            test_indices,
        })
    }

    /// Build from flat interleaved `x, y` coordinate lists, one per polygon.
    ///
    /// The first polygon that fails to close is reported by its position.
    pub fn from_xy<P>(polygons: &[P], test_indices: Vec<usize>) -> Result<Self, SearchError>
    where
        P: AsRef<[f64]>,
    {
        let polygons = polygons
            .iter()
            .enumerate()
            .map(|(position, xy)| {
                Polygon::from_xy(xy.as_ref())
                    .map_err(|source| SearchError::MalformedPolygon { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(polygons, test_indices)
    }

    /// Test every polygon in the collection.
    pub fn all(polygons: Vec<Polygon>) -> Self {
        let test_indices = (0..polygons.len()).collect();
        Self {
            polygons,
            test_indices,
        }
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn polygon(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    #[inline]
    pub fn test_indices(&self) -> &[usize] {
        &self.test_indices
    }

    #[inline]
    pub fn n_polygons(&self) -> usize {
        self.polygons.len()
    }

    #[inline]
    pub fn n_tests(&self) -> usize {
        self.test_indices.len()
    }
}
