//! Error types for coordinate projection.

use gridmap_common::GridMapError;
use thiserror::Error;

/// Errors that can occur while projecting coordinate arrays.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Longitude and latitude arrays cannot be paired elementwise.
    #[error("longitude shape {lon:?} does not match latitude shape {lat:?}")]
    ShapeMismatch { lon: Vec<usize>, lat: Vec<usize> },
}

impl ProjectionError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(lon: &[usize], lat: &[usize]) -> Self {
        Self::ShapeMismatch {
            lon: lon.to_vec(),
            lat: lat.to_vec(),
        }
    }
}

impl From<ProjectionError> for GridMapError {
    fn from(err: ProjectionError) -> Self {
        GridMapError::shape_mismatch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_shape_mismatch() {
        let err: GridMapError = ProjectionError::shape_mismatch(&[3], &[2]).into();
        assert_eq!(
            err,
            GridMapError::ShapeMismatch(
                "longitude shape [3] does not match latitude shape [2]".to_string()
            )
        );
    }
}
