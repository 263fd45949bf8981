//! Test data generators for coordinate axes, samples and points.
//!
//! Everything here is deterministic: the same arguments (and seed) always
//! produce the same coordinates, so failures are reproducible.

use gridmap_common::PointSet;

/// Creates an evenly spaced coordinate axis.
///
/// # Arguments
///
/// * `start` - First coordinate value (degrees)
/// * `step` - Spacing between values (degrees, may be negative)
/// * `count` - Number of values
///
/// # Example
///
/// ```
/// use test_utils::create_axis;
///
/// let axis = create_axis(-10.0, 10.0, 3);
/// assert_eq!(axis, vec![-10.0, 0.0, 10.0]);
/// ```
pub fn create_axis(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Creates one (lat, lon) sample per cell of the grid spanned by two axes.
///
/// Samples are returned as parallel `(lats, lons)` vectors in row-major
/// order: all longitudes of the first latitude, then the next latitude.
pub fn create_grid_samples(lat_axis: &[f64], lon_axis: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut lats = Vec::with_capacity(lat_axis.len() * lon_axis.len());
    let mut lons = Vec::with_capacity(lat_axis.len() * lon_axis.len());
    for &lat in lat_axis {
        for &lon in lon_axis {
            lats.push(lat);
            lons.push(lon);
        }
    }
    (lats, lons)
}

/// Creates grid samples the way real source files list them: every cell at
/// least once, some cells repeated, in scrambled order, with floating-point
/// noise of at most `noise` degrees added to each coordinate.
///
/// # Arguments
///
/// * `lat_axis` / `lon_axis` - Axes of the underlying regular grid
/// * `noise` - Maximum absolute perturbation per coordinate
/// * `seed` - Seed value for deterministic generation
pub fn create_noisy_samples(
    lat_axis: &[f64],
    lon_axis: &[f64],
    noise: f64,
    seed: u32,
) -> (Vec<f64>, Vec<f64>) {
    let (lats, lons) = create_grid_samples(lat_axis, lon_axis);

    // Every cell once, every third cell twice
    let mut order: Vec<usize> = (0..lats.len()).chain((0..lats.len()).step_by(3)).collect();
    order.sort_by_key(|&i| simple_hash(i as u32, order_salt(i), seed));

    let mut out_lats = Vec::with_capacity(order.len());
    let mut out_lons = Vec::with_capacity(order.len());
    for (k, &i) in order.iter().enumerate() {
        out_lats.push(lats[i] + jitter(k as u32, 0, seed, noise));
        out_lons.push(lons[i] + jitter(k as u32, 1, seed, noise));
    }
    (out_lats, out_lons)
}

/// Creates samples for a subset of the grid cells.
///
/// A cell is kept when its hash falls in the first `keep_percent` percent;
/// the first and last cell are always kept so both axes keep their full
/// extent.
pub fn create_sparse_samples(
    lat_axis: &[f64],
    lon_axis: &[f64],
    keep_percent: u32,
    seed: u32,
) -> (Vec<f64>, Vec<f64>) {
    let (lats, lons) = create_grid_samples(lat_axis, lon_axis);
    let last = lats.len().saturating_sub(1);

    lats.into_iter()
        .zip(lons)
        .enumerate()
        .filter(|&(i, _)| i == 0 || i == last || simple_hash(i as u32, 7, seed) % 100 < keep_percent)
        .map(|(_, pair)| pair)
        .unzip()
}

/// Creates scattered points inside a bounding box.
///
/// # Arguments
///
/// * `count` - Number of points
/// * `bbox` - `(min_lon, min_lat, max_lon, max_lat)` in degrees
/// * `seed` - Seed value for deterministic generation
pub fn create_scattered_points(count: usize, bbox: (f64, f64, f64, f64), seed: u32) -> PointSet {
    let (min_lon, min_lat, max_lon, max_lat) = bbox;
    let mut lons = Vec::with_capacity(count);
    let mut lats = Vec::with_capacity(count);
    for i in 0..count {
        lons.push(min_lon + unit(i as u32, 0, seed) * (max_lon - min_lon));
        lats.push(min_lat + unit(i as u32, 1, seed) * (max_lat - min_lat));
    }
    PointSet::new(lons, lats)
}

fn order_salt(i: usize) -> u32 {
    (i as u32).rotate_left(11)
}

/// Pseudo-random value in `[0, 1]`.
fn unit(x: u32, y: u32, seed: u32) -> f64 {
    simple_hash(x, y, seed) as f64 / u32::MAX as f64
}

/// Pseudo-random value in `[-amplitude, amplitude]`.
fn jitter(x: u32, y: u32, seed: u32, amplitude: f64) -> f64 {
    (unit(x, y, seed) * 2.0 - 1.0) * amplitude
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmap_common::PointCollection;

    #[test]
    fn test_create_axis() {
        assert_eq!(create_axis(0.0, 0.5, 4), vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(create_axis(90.0, -45.0, 3), vec![90.0, 45.0, 0.0]);
        assert!(create_axis(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_create_grid_samples_row_major() {
        let (lats, lons) = create_grid_samples(&[10.0, 20.0], &[1.0, 2.0, 3.0]);
        assert_eq!(lats, vec![10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
        assert_eq!(lons, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_create_noisy_samples_is_deterministic() {
        let lat_axis = create_axis(0.0, 1.0, 4);
        let lon_axis = create_axis(0.0, 1.0, 5);

        let a = create_noisy_samples(&lat_axis, &lon_axis, 1e-6, 42);
        let b = create_noisy_samples(&lat_axis, &lon_axis, 1e-6, 42);
        assert_eq!(a, b);

        // 20 cells plus every third repeated
        assert_eq!(a.0.len(), 20 + 7);
        assert!(a.0.iter().all(|v| (v - v.round()).abs() <= 1e-6));
        assert!(a.1.iter().all(|v| (v - v.round()).abs() <= 1e-6));
    }

    #[test]
    fn test_create_sparse_samples_keeps_extent() {
        let lat_axis = create_axis(0.0, 1.0, 10);
        let lon_axis = create_axis(100.0, 1.0, 10);
        let (lats, lons) = create_sparse_samples(&lat_axis, &lon_axis, 30, 7);

        assert!(lats.len() < 100);
        assert_eq!((lats[0], lons[0]), (0.0, 100.0));
        assert_eq!((lats[lats.len() - 1], lons[lons.len() - 1]), (9.0, 109.0));
    }

    #[test]
    fn test_create_scattered_points_in_bbox() {
        let points = create_scattered_points(100, (-130.0, 20.0, -60.0, 55.0), 1);
        assert_eq!(points.len(), 100);
        assert!(points.lons().iter().all(|&v| (-130.0..=-60.0).contains(&v)));
        assert!(points.lats().iter().all(|&v| (20.0..=55.0).contains(&v)));
    }
}
