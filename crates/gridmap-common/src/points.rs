//! Point collections that can be annotated with grid indices.

/// The contract a caller's point type fulfils to receive grid indices.
///
/// Readers return the point coordinates in degrees; writers store one
/// index per point. x-indices are grid columns (longitude axis), y-indices
/// are grid rows (latitude axis).
pub trait PointCollection {
    /// Longitudes of all points, in degrees.
    fn lons(&self) -> &[f64];

    /// Latitudes of all points, in degrees.
    fn lats(&self) -> &[f64];

    /// Store the column index of every point.
    fn add_xs(&mut self, xs: Vec<usize>);

    /// Store the row index of every point.
    fn add_ys(&mut self, ys: Vec<usize>);
}

/// A plain set of points backed by parallel vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    lons: Vec<f64>,
    lats: Vec<f64>,
    xs: Option<Vec<usize>>,
    ys: Option<Vec<usize>>,
}

impl PointSet {
    /// Create a point set from parallel longitude and latitude vectors.
    ///
    /// Lengths are not checked here; locating mismatched coordinates
    /// fails with a shape mismatch.
    pub fn new(lons: Vec<f64>, lats: Vec<f64>) -> Self {
        Self {
            lons,
            lats,
            xs: None,
            ys: None,
        }
    }

    /// Create a point set from (lon, lat) pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let (lons, lats) = pairs.iter().copied().unzip();
        Self::new(lons, lats)
    }

    /// Column indices, once annotated.
    pub fn xs(&self) -> Option<&[usize]> {
        self.xs.as_deref()
    }

    /// Row indices, once annotated.
    pub fn ys(&self) -> Option<&[usize]> {
        self.ys.as_deref()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.lons.len()
    }

    /// Check if the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }
}

impl PointCollection for PointSet {
    fn lons(&self) -> &[f64] {
        &self.lons
    }

    fn lats(&self) -> &[f64] {
        &self.lats
    }

    fn add_xs(&mut self, xs: Vec<usize>) {
        self.xs = Some(xs);
    }

    fn add_ys(&mut self, ys: Vec<usize>) {
        self.ys = Some(ys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_set_from_pairs() {
        let points = PointSet::from_pairs(&[(5.0, 10.0), (6.0, 20.0)]);
        assert_eq!(points.lons(), &[5.0, 6.0]);
        assert_eq!(points.lats(), &[10.0, 20.0]);
        assert_eq!(points.len(), 2);
        assert!(points.xs().is_none());
        assert!(points.ys().is_none());
    }

    #[test]
    fn test_point_set_stores_indices() {
        let mut points = PointSet::new(vec![0.0], vec![0.0]);
        points.add_xs(vec![3]);
        points.add_ys(vec![7]);
        assert_eq!(points.xs(), Some(&[3][..]));
        assert_eq!(points.ys(), Some(&[7][..]));
    }
}
