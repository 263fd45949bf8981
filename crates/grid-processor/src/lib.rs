//! Nearest-Cell Grid Mapping
//!
//! This crate maps scattered lon/lat points onto the nearest cell of a
//! regular lat/lon grid, and infers such a grid from scattered samples of
//! its coordinates. It enables:
//!
//! - **Locating**: (row, col) of the nearest grid cell for every query point
//! - **Grid inference**: unique sorted axes plus an active-cell mask from
//!   unordered, duplicated coordinate samples
//! - **Annotation**: writing grid indices back onto a caller's points
//!
//! # Architecture
//!
//! ```text
//! lon/lat samples                      points
//!      │                                  │
//!      ▼                                  ▼
//! infer_grid()                      annotate(grid)
//!      │                                  │
//!      ├─► round + unique → lon/lat axes  │
//!      │                                  │
//!      └──────────────┬───────────────────┘
//!                     ▼
//!               Locator::locate
//!                     │
//!                     ├─► project target field + queries onto the sphere
//!                     │
//!                     ├─► R*-tree over target points, nearest neighbor per query
//!                     │
//!                     └─► unravel flat index → (row, col)
//! ```
//!
//! # Example
//!
//! ```
//! use grid_processor::{annotate, infer_grid};
//! use gridmap_common::PointSet;
//!
//! let lats = [10.0, 10.0, 20.0, 20.0];
//! let lons = [5.0, 6.0, 5.0, 6.0];
//! let grid = infer_grid(&lats, &lons, 4)?;
//! assert_eq!(grid.shape(), (2, 2));
//!
//! let mut points = PointSet::from_pairs(&[(5.9, 19.0)]);
//! annotate(&grid, &mut points)?;
//! assert_eq!(points.xs(), Some(&[1][..]));
//! assert_eq!(points.ys(), Some(&[1][..]));
//! # Ok::<(), gridmap_common::GridMapError>(())
//! ```

pub mod annotate;
pub mod config;
pub mod infer;
pub mod locate;

// Re-export commonly used types at crate root
pub use annotate::{annotate, annotate_with};
pub use config::{GridInferenceConfig, DEFAULT_DECIMALS};
pub use gridmap_common::{GridMapError, Result, TargetGrid};
pub use infer::{infer_grid, infer_grid_with_config, round_to_decimals};
pub use locate::{locate, GridIndices, Locator, TargetCoords};
