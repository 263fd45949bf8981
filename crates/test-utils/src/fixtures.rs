//! Common test fixtures for gridmap tests.
//!
//! This module provides pre-defined domains and grid layouts that show up
//! repeatedly when inferring grids and locating points.

/// Common bounding box definitions for testing, as
/// `(min_lon, min_lat, max_lon, max_lat)`.
pub mod bbox {
    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, -90.0, 180.0, 90.0);

    /// Continental United States bounding box
    pub const CONUS: (f64, f64, f64, f64) = (-130.0, 20.0, -60.0, 55.0);

    /// Europe bounding box
    pub const EUROPE: (f64, f64, f64, f64) = (-15.0, 35.0, 45.0, 72.0);

    /// Crosses the antimeridian, expressed in 0..360 longitudes
    pub const PACIFIC: (f64, f64, f64, f64) = (160.0, -50.0, 220.0, 50.0);
}

/// Common grid layouts for testing.
pub mod grid {
    /// Three by three grid centred on (0, 0) with 10 degree spacing.
    pub const SMALL_3X3: GridSpec = GridSpec {
        rows: 3,
        cols: 3,
        min_lon: -10.0,
        min_lat: -10.0,
        step: 10.0,
    };

    /// Coarse CONUS grid (1 degree resolution)
    pub const CONUS_1DEG: GridSpec = GridSpec {
        rows: 36,
        cols: 71,
        min_lon: -130.0,
        min_lat: 20.0,
        step: 1.0,
    };

    /// Pacific grid spanning the antimeridian in 0..360 longitudes
    pub const PACIFIC_2DEG: GridSpec = GridSpec {
        rows: 51,
        cols: 31,
        min_lon: 160.0,
        min_lat: -50.0,
        step: 2.0,
    };

    /// Fine grid with spacing small enough that rounding to 2 decimals
    /// would merge neighbours.
    pub const FINE_0_001: GridSpec = GridSpec {
        rows: 5,
        cols: 5,
        min_lon: 12.0,
        min_lat: 45.0,
        step: 0.001,
    };

    /// Regular lat/lon grid layout.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GridSpec {
        pub rows: usize,
        pub cols: usize,
        pub min_lon: f64,
        pub min_lat: f64,
        /// Spacing in degrees, shared by both axes
        pub step: f64,
    }

    impl GridSpec {
        /// Total number of cells
        pub fn size(&self) -> usize {
            self.rows * self.cols
        }

        /// Ascending latitude axis (one value per row)
        pub fn lat_axis(&self) -> Vec<f64> {
            crate::create_axis(self.min_lat, self.step, self.rows)
        }

        /// Ascending longitude axis (one value per column)
        pub fn lon_axis(&self) -> Vec<f64> {
            crate::create_axis(self.min_lon, self.step, self.cols)
        }

        /// Bounding box covered by the cell centres
        pub fn bbox(&self) -> (f64, f64, f64, f64) {
            (
                self.min_lon,
                self.min_lat,
                self.min_lon + (self.cols.saturating_sub(1)) as f64 * self.step,
                self.min_lat + (self.rows.saturating_sub(1)) as f64 * self.step,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::grid::*;

    #[test]
    fn test_grid_spec_axes() {
        assert_eq!(SMALL_3X3.lat_axis(), vec![-10.0, 0.0, 10.0]);
        assert_eq!(SMALL_3X3.lon_axis(), vec![-10.0, 0.0, 10.0]);
        assert_eq!(SMALL_3X3.size(), 9);
    }

    #[test]
    fn test_grid_spec_bbox() {
        assert_eq!(CONUS_1DEG.bbox(), (-130.0, 20.0, -60.0, 55.0));
        assert_eq!(PACIFIC_2DEG.bbox(), (160.0, -50.0, 220.0, 50.0));
    }
}
