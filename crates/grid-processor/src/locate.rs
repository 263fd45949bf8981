//! Nearest-neighbor mapping of lon/lat points onto grid indices.
//!
//! Target coordinates and query points are projected onto a sphere and an
//! R*-tree is built over the target points. Each query takes its single
//! nearest target point by Euclidean (chord) distance, which orders
//! neighbors the same way great-circle distance does. The flat index of that
//! point is unravelled row-major into (row, col) of the target field.

use gridmap_common::{GridMapError, Result};
use ndarray::{ArrayView1, ArrayView2};
use projection::SphericalProjector;

use crate::config::validate_radius;
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// Target grid coordinates to search.
#[derive(Debug, Clone, Copy)]
pub enum TargetCoords<'a> {
    /// Orthogonal axes. The target field is their outer product:
    /// row `i`, column `j` sits at (`lats[i]`, `lons[j]`).
    Axes {
        lats: ArrayView1<'a, f64>,
        lons: ArrayView1<'a, f64>,
    },
    /// Full 2D coordinate fields of identical shape, used as-is.
    Field {
        lats: ArrayView2<'a, f64>,
        lons: ArrayView2<'a, f64>,
    },
}

impl<'a> TargetCoords<'a> {
    /// Target from 1D latitude and longitude axes.
    pub fn axes(lats: ArrayView1<'a, f64>, lons: ArrayView1<'a, f64>) -> Self {
        Self::Axes { lats, lons }
    }

    /// Target from 2D latitude and longitude fields.
    pub fn field(lats: ArrayView2<'a, f64>, lons: ArrayView2<'a, f64>) -> Self {
        Self::Field { lats, lons }
    }

    /// Shape of the target field as (rows, cols).
    pub fn shape(&self) -> Result<(usize, usize)> {
        match self {
            Self::Axes { lats, lons } => Ok((lats.len(), lons.len())),
            Self::Field { lats, lons } => {
                if lats.dim() != lons.dim() {
                    return Err(GridMapError::shape_mismatch(format!(
                        "target latitude field {:?} and longitude field {:?} differ in shape",
                        lats.shape(),
                        lons.shape()
                    )));
                }
                Ok(lats.dim())
            }
        }
    }

    /// Flattened (lons, lats) of every target point in row-major order.
    fn flatten(&self) -> (Vec<f64>, Vec<f64>) {
        match self {
            Self::Axes { lats, lons } => {
                let n = lats.len() * lons.len();
                let mut flat_lons = Vec::with_capacity(n);
                let mut flat_lats = Vec::with_capacity(n);
                for &lat in lats.iter() {
                    for &lon in lons.iter() {
                        flat_lons.push(lon);
                        flat_lats.push(lat);
                    }
                }
                (flat_lons, flat_lats)
            }
            Self::Field { lats, lons } => (
                lons.iter().copied().collect(),
                lats.iter().copied().collect(),
            ),
        }
    }
}

/// Row and column indices of the nearest target cell for each query point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridIndices {
    /// Row (latitude) index per query point.
    pub rows: Vec<usize>,
    /// Column (longitude) index per query point.
    pub cols: Vec<usize>,
}

impl GridIndices {
    /// Number of located points.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no points were located.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate (row, col) pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().copied().zip(self.cols.iter().copied())
    }
}

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// Nearest-neighbor index over projected target points.
///
/// Lives for a single locate call.
struct TargetIndex {
    tree: RTree<IndexedPoint>,
    cols: usize,
}

impl TargetIndex {
    fn build(projector: &SphericalProjector, target: &TargetCoords<'_>) -> Result<Self> {
        let (_, cols) = target.shape()?;
        let (lons, lats) = target.flatten();
        let points = projector.project_all(&lons, &lats)?;

        let entries = points
            .into_iter()
            .enumerate()
            .map(|(flat, p)| {
                let coords = [p.x, p.y, p.z];
                if !is_finite_point(&coords) {
                    return Err(GridMapError::invalid_value(
                        "target",
                        format!(
                            "cell ({}, {}) has non-finite coordinates (lat={}, lon={})",
                            flat / cols,
                            flat % cols,
                            lats[flat],
                            lons[flat]
                        ),
                    ));
                }
                Ok(IndexedPoint::new(coords, flat))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            tree: RTree::bulk_load(entries),
            cols,
        })
    }

    /// (row, col) of the target point nearest to `query`.
    fn nearest(&self, query: [f64; 3]) -> Option<(usize, usize)> {
        self.tree
            .nearest_neighbor(&query)
            .map(|hit| (hit.data / self.cols, hit.data % self.cols))
    }
}

/// The R*-tree cannot order NaN distances, so every point entering it must be
/// finite.
fn is_finite_point(p: &[f64; 3]) -> bool {
    p.iter().all(|v| v.is_finite())
}

/// Locates query points on a target grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locator {
    projector: SphericalProjector,
}

impl Locator {
    /// Locator projecting onto a sphere of the given radius.
    ///
    /// The radius scales every distance equally, so it never changes which
    /// cell is nearest. Fails with `InvalidConfig` unless the radius is
    /// finite and positive.
    pub fn new(radius: f64) -> Result<Self> {
        validate_radius(radius)?;
        Ok(Self {
            projector: SphericalProjector::new(radius),
        })
    }

    /// Find the nearest target cell for every query point.
    ///
    /// Fails with `ShapeMismatch` when the query slices differ in length,
    /// when 2D target fields differ in shape, or when there are query points
    /// but no target points. Non-finite coordinates in either the target or
    /// the query fail with `InvalidValue`.
    pub fn locate(
        &self,
        query_lats: &[f64],
        query_lons: &[f64],
        target: &TargetCoords<'_>,
    ) -> Result<GridIndices> {
        if query_lats.len() != query_lons.len() {
            return Err(GridMapError::shape_mismatch(format!(
                "query latitudes ({}) and longitudes ({}) differ in length",
                query_lats.len(),
                query_lons.len()
            )));
        }

        let (rows, cols) = target.shape()?;

        tracing::debug!(
            target_rows = rows,
            target_cols = cols,
            queries = query_lats.len(),
            "Locating nearest grid cells"
        );

        if query_lats.is_empty() {
            return Ok(GridIndices::default());
        }

        if rows == 0 || cols == 0 {
            return Err(GridMapError::shape_mismatch(format!(
                "cannot locate {} points on an empty {}x{} target",
                query_lats.len(),
                rows,
                cols
            )));
        }

        let index = TargetIndex::build(&self.projector, target)?;

        let mut out = GridIndices {
            rows: Vec::with_capacity(query_lats.len()),
            cols: Vec::with_capacity(query_lats.len()),
        };

        for (i, (&lat, &lon)) in query_lats.iter().zip(query_lons).enumerate() {
            let p = self.projector.project(lon, lat);
            let coords = [p.x, p.y, p.z];
            if !is_finite_point(&coords) {
                return Err(GridMapError::invalid_value(
                    "query",
                    format!("point {} has non-finite coordinates (lat={}, lon={})", i, lat, lon),
                ));
            }
            let (row, col) = index.nearest(coords).ok_or_else(|| {
                GridMapError::shape_mismatch(format!(
                    "no nearest target point for query (lat={}, lon={})",
                    lat, lon
                ))
            })?;
            out.rows.push(row);
            out.cols.push(col);
        }

        Ok(out)
    }
}

/// Find the nearest target cell for every query point, projecting onto the
/// unit sphere.
pub fn locate(query_lats: &[f64], query_lons: &[f64], target: &TargetCoords<'_>) -> Result<GridIndices> {
    Locator::default().locate(query_lats, query_lons, target)
}
