//! Inference of a regular grid from scattered coordinate samples.
//!
//! Samples (one lat/lon pair per source cell, in any order, possibly
//! repeated) are rounded so floating-point noise collapses onto a single
//! axis value, then the sorted unique values become the grid axes. The mask
//! marks every cell that is the nearest cell of at least one sample; cells
//! no sample maps to stay inactive even if they lie inside the sampled
//! domain.

use gridmap_common::{GridMapError, Result, TargetGrid};
use ndarray::{Array1, Array2};

use crate::config::GridInferenceConfig;
use crate::locate::{Locator, TargetCoords};

/// Round to a number of decimal digits, ties to even.
///
/// Negative `decimals` round to the left of the decimal point
/// (`-1` rounds to tens).
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    if decimals >= 0 {
        let scale = 10f64.powi(decimals);
        (value * scale).round_ties_even() / scale
    } else {
        let scale = 10f64.powi(-decimals);
        (value / scale).round_ties_even() * scale
    }
}

/// Sorted unique values after rounding.
///
/// `-0.0` and `0.0` are treated as one value.
fn unique_axis(values: &[f64], decimals: i32) -> Array1<f64> {
    let mut axis: Vec<f64> = values
        .iter()
        .map(|&v| round_to_decimals(v, decimals))
        .collect();
    axis.sort_by(f64::total_cmp);
    axis.dedup();
    Array1::from(axis)
}

fn check_finite(variable: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(GridMapError::invalid_value(
            variable,
            format!("sample {} is {}", i, values[i]),
        )),
        None => Ok(()),
    }
}

/// Infer a regular grid from lat/lon samples, rounding to `decimals` digits.
pub fn infer_grid(lats: &[f64], lons: &[f64], decimals: i32) -> Result<TargetGrid> {
    infer_grid_with_config(lats, lons, &GridInferenceConfig::with_decimals(decimals))
}

/// Infer a regular grid from lat/lon samples.
///
/// Fails with `EmptyInput` when either slice is empty, with
/// `ShapeMismatch` when they differ in length and with `InvalidValue` when
/// a sample is NaN or infinite.
pub fn infer_grid_with_config(
    lats: &[f64],
    lons: &[f64],
    config: &GridInferenceConfig,
) -> Result<TargetGrid> {
    config.validate()?;

    if lats.is_empty() || lons.is_empty() {
        return Err(GridMapError::empty_input(format!(
            "cannot infer a grid from {} latitudes and {} longitudes",
            lats.len(),
            lons.len()
        )));
    }

    if lats.len() != lons.len() {
        return Err(GridMapError::shape_mismatch(format!(
            "sample latitudes ({}) and longitudes ({}) differ in length",
            lats.len(),
            lons.len()
        )));
    }

    check_finite("lats", lats)?;
    check_finite("lons", lons)?;

    tracing::debug!(
        samples = lats.len(),
        decimals = config.decimals,
        "Calculating grid size"
    );

    let lon = unique_axis(lons, config.decimals);
    tracing::info!(count = lon.len(), "Found unique longitudes");

    let lat = unique_axis(lats, config.decimals);
    tracing::info!(count = lat.len(), "Found unique latitudes");

    // Original samples, not the rounded ones, pick the cells
    let indices = Locator::new(config.radius)?.locate(
        lats,
        lons,
        &TargetCoords::axes(lat.view(), lon.view()),
    )?;

    let mut mask = Array2::<i32>::zeros((lat.len(), lon.len()));
    for (row, col) in indices.iter() {
        mask[[row, col]] = 1;
    }

    let grid = TargetGrid::from_axes(lon, lat, mask)?;

    tracing::info!(
        rows = grid.shape().0,
        cols = grid.shape().1,
        active_cells = grid.active_cells(),
        "Created target grid from sample coordinates"
    );

    Ok(grid)
}
