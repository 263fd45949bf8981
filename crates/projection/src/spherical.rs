//! Longitude/latitude to Cartesian coordinates on a sphere.
//!
//! For a sphere of radius `r`, a point at longitude `λ` and latitude `φ`
//! (degrees) maps to:
//!
//! ```text
//! x = r·cos(φ)·cos(λ)
//! y = r·cos(φ)·sin(λ)
//! z = r·sin(φ)
//! ```
//!
//! Longitudes are used as given: 190° and -170° land on the same point, so
//! no wrapping into a canonical range is needed before projecting.

use nalgebra::{Point3, Scalar};
use ndarray::{Array, ArrayView, Dimension, Zip};
use num_traits::Float;

use crate::error::ProjectionError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_229.0;

/// Project a single lon/lat pair (degrees) onto a sphere of the given radius.
pub fn project<T: Float + Scalar>(lon: T, lat: T, radius: T) -> Point3<T> {
    let lon_r = lon.to_radians();
    let lat_r = lat.to_radians();

    let (sin_lat, cos_lat) = lat_r.sin_cos();
    let (sin_lon, cos_lon) = lon_r.sin_cos();

    Point3::new(
        radius * cos_lat * cos_lon,
        radius * cos_lat * sin_lon,
        radius * sin_lat,
    )
}

/// Projects coordinates onto a sphere of fixed radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalProjector {
    radius: f64,
}

impl Default for SphericalProjector {
    /// Unit sphere.
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl SphericalProjector {
    /// Create a projector for a sphere of the given radius.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Projector for the mean Earth sphere, in meters.
    pub fn earth() -> Self {
        Self::new(EARTH_RADIUS_M)
    }

    /// Sphere radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Project one lon/lat pair (degrees).
    pub fn project(&self, lon: f64, lat: f64) -> Point3<f64> {
        project(lon, lat, self.radius)
    }

    /// Project parallel lon/lat slices into a vector of points.
    pub fn project_all(&self, lons: &[f64], lats: &[f64]) -> Result<Vec<Point3<f64>>, ProjectionError> {
        if lons.len() != lats.len() {
            return Err(ProjectionError::shape_mismatch(&[lons.len()], &[lats.len()]));
        }

        Ok(lons
            .iter()
            .zip(lats)
            .map(|(&lon, &lat)| self.project(lon, lat))
            .collect())
    }

    /// Project lon/lat arrays of any dimensionality, returning x, y and z
    /// arrays of the same shape.
    #[allow(clippy::type_complexity)]
    pub fn project_arrays<D: Dimension>(
        &self,
        lon: ArrayView<'_, f64, D>,
        lat: ArrayView<'_, f64, D>,
    ) -> Result<(Array<f64, D>, Array<f64, D>, Array<f64, D>), ProjectionError> {
        if lon.shape() != lat.shape() {
            return Err(ProjectionError::shape_mismatch(lon.shape(), lat.shape()));
        }

        let points = Zip::from(&lon)
            .and(&lat)
            .map_collect(|&lo, &la| self.project(lo, la));

        Ok((
            points.mapv(|p| p.x),
            points.mapv(|p| p.y),
            points.mapv(|p| p.z),
        ))
    }
}
