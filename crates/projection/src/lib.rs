//! Coordinate transformations for nearest-neighbor search on the sphere.
//!
//! Longitude/latitude pairs are projected to 3D Cartesian points so that
//! Euclidean distance between points tracks great-circle distance, without
//! the date-line and pole artifacts of searching in degree space.

pub mod error;
pub mod spherical;

pub use error::ProjectionError;
pub use spherical::{project, SphericalProjector, EARTH_RADIUS_M};
