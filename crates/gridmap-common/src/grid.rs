//! Target grids: the regular lat/lon grids points are mapped onto.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Ix1, Ix2};
use serde::{Deserialize, Serialize};

use crate::attributed::{attributes, AttributedArray};
use crate::error::{GridMapError, Result};
use crate::source::{MemoryDataset, MemoryVariable, VariableSource};

/// Variable and dimension name of the longitude axis.
pub const LON: &str = "lon";
/// Variable and dimension name of the latitude axis.
pub const LAT: &str = "lat";
/// Variable name of the active-cell mask.
pub const MASK: &str = "mask";

/// A regular lat/lon grid with its active-cell mask.
///
/// `lon` and `lat` are 1D coordinate axes; `mask` has shape
/// `(lat.len(), lon.len())` and holds 1 for active cells, 0 otherwise.
/// Grids are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridParts")]
pub struct TargetGrid {
    lon: AttributedArray<f64, Ix1>,
    lat: AttributedArray<f64, Ix1>,
    mask: AttributedArray<i32, Ix2>,
}

#[derive(Deserialize)]
struct GridParts {
    lon: AttributedArray<f64, Ix1>,
    lat: AttributedArray<f64, Ix1>,
    mask: AttributedArray<i32, Ix2>,
}

impl TryFrom<GridParts> for TargetGrid {
    type Error = GridMapError;

    fn try_from(parts: GridParts) -> Result<Self> {
        Self::new(parts.lon, parts.lat, parts.mask)
    }
}

impl TargetGrid {
    /// Assemble a grid from already-attributed parts.
    ///
    /// Fails with `DimensionMismatch` when the mask is not shaped
    /// `(lat.len(), lon.len())`.
    pub fn new(
        lon: AttributedArray<f64, Ix1>,
        lat: AttributedArray<f64, Ix1>,
        mask: AttributedArray<i32, Ix2>,
    ) -> Result<Self> {
        let expected = [lat.len(), lon.len()];
        if mask.shape() != &expected[..] {
            return Err(GridMapError::dimension_mismatch(format!(
                "mask shape {:?} does not match (lat, lon) = {:?}",
                mask.shape(),
                expected
            )));
        }
        Ok(Self { lon, lat, mask })
    }

    /// Build a grid from bare axes and mask, attaching the standard
    /// coordinate and mask metadata.
    pub fn from_axes(lon: Array1<f64>, lat: Array1<f64>, mask: Array2<i32>) -> Result<Self> {
        let lon = AttributedArray::from_data(
            lon,
            [LON],
            attributes([
                ("long_name", "longitude coordinate"),
                ("units", "degrees_east"),
            ]),
        )?;
        let lat = AttributedArray::from_data(
            lat,
            [LAT],
            attributes([
                ("long_name", "latitude coordinate"),
                ("units", "degrees_north"),
            ]),
        )?;
        let mask = AttributedArray::from_data(
            mask,
            [LAT, LON],
            attributes([
                ("long_name", "domain mask"),
                ("comment", "0 indicates grid cell is not active"),
            ]),
        )?;
        Self::new(lon, lat, mask)
    }

    /// Read a grid from the `lon`, `lat` and `mask` variables of a dataset.
    pub fn from_source<S>(source: &S) -> Result<Self>
    where
        S: VariableSource + ?Sized,
    {
        let lon = AttributedArray::<f64>::from_variable(source, LON)?.into_dimensionality::<Ix1>()?;
        let lat = AttributedArray::<f64>::from_variable(source, LAT)?.into_dimensionality::<Ix1>()?;
        let mask =
            AttributedArray::<i32>::from_variable(source, MASK)?.into_dimensionality::<Ix2>()?;
        Self::new(lon, lat, mask)
    }

    /// Store the grid's dimensions and variables into a dataset.
    pub fn write_to(&self, dataset: &mut MemoryDataset) {
        dataset
            .define_dimension(LON, self.lon.len())
            .define_dimension(LAT, self.lat.len());

        dataset.put_variable(
            LON,
            MemoryVariable::new(
                self.lon.data().clone().into_dyn(),
                self.lon.dimensions().iter().cloned(),
                self.lon.attributes().clone(),
            ),
        );
        dataset.put_variable(
            LAT,
            MemoryVariable::new(
                self.lat.data().clone().into_dyn(),
                self.lat.dimensions().iter().cloned(),
                self.lat.attributes().clone(),
            ),
        );
        dataset.put_variable(
            MASK,
            MemoryVariable::new(
                self.mask.data().mapv(f64::from).into_dyn(),
                self.mask.dimensions().iter().cloned(),
                self.mask.attributes().clone(),
            ),
        );
    }

    /// The longitude axis with its metadata.
    pub fn lon(&self) -> &AttributedArray<f64, Ix1> {
        &self.lon
    }

    /// The latitude axis with its metadata.
    pub fn lat(&self) -> &AttributedArray<f64, Ix1> {
        &self.lat
    }

    /// The active-cell mask with its metadata.
    pub fn mask(&self) -> &AttributedArray<i32, Ix2> {
        &self.mask
    }

    /// Longitude axis values.
    pub fn lon_axis(&self) -> ArrayView1<'_, f64> {
        self.lon.view()
    }

    /// Latitude axis values.
    pub fn lat_axis(&self) -> ArrayView1<'_, f64> {
        self.lat.view()
    }

    /// Mask values, indexed `[row, col]` = `[lat, lon]`.
    pub fn mask_values(&self) -> ArrayView2<'_, i32> {
        self.mask.view()
    }

    /// Grid shape as (rows, cols) = (lat count, lon count).
    pub fn shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    /// Check whether the cell at (row, col) is active.
    ///
    /// Cells outside the grid are never active.
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.mask
            .data()
            .get((row, col))
            .is_some_and(|&v| v != 0)
    }

    /// Number of active cells.
    pub fn active_cells(&self) -> usize {
        self.mask.data().iter().filter(|&&v| v != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributed::AttrValue;
    use ndarray::array;

    fn sample_grid() -> TargetGrid {
        TargetGrid::from_axes(
            array![5.0, 6.0],
            array![10.0, 20.0, 30.0],
            array![[1, 0], [0, 1], [1, 1]],
        )
        .unwrap()
    }

    #[test]
    fn test_from_axes_attaches_metadata() {
        let grid = sample_grid();

        assert_eq!(grid.shape(), (3, 2));
        assert_eq!(
            grid.lon().attribute("units"),
            Some(&AttrValue::from("degrees_east"))
        );
        assert_eq!(
            grid.lat().attribute("long_name").and_then(AttrValue::as_str),
            Some("latitude coordinate")
        );
        assert_eq!(
            grid.mask().attribute("long_name").and_then(AttrValue::as_str),
            Some("domain mask")
        );
        assert_eq!(grid.mask().dimensions(), &["lat".to_string(), "lon".to_string()]);
        assert_eq!(grid.mask().dim_len("lat"), Some(3));
        assert_eq!(grid.mask().dim_len("lon"), Some(2));
    }

    #[test]
    fn test_mask_shape_must_match_axes() {
        let err = TargetGrid::from_axes(array![5.0, 6.0], array![10.0], array![[1], [1]]).unwrap_err();
        assert!(matches!(err, GridMapError::DimensionMismatch(_)));
    }

    #[test]
    fn test_active_cells() {
        let grid = sample_grid();
        assert_eq!(grid.active_cells(), 4);
        assert!(grid.is_active(0, 0));
        assert!(!grid.is_active(0, 1));
        assert!(!grid.is_active(3, 0));
    }

    #[test]
    fn test_dataset_round_trip() {
        let grid = sample_grid();
        let mut ds = MemoryDataset::new();
        grid.write_to(&mut ds);

        assert_eq!(ds.dimension_len("lat"), Some(3));
        assert_eq!(ds.dimension_len("lon"), Some(2));

        let back = TargetGrid::from_source(&ds).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_from_source_rejects_2d_axis() {
        let mut ds = MemoryDataset::new();
        sample_grid().write_to(&mut ds);
        ds.put_variable(
            "lon",
            MemoryVariable::new(
                array![[5.0, 6.0], [5.0, 6.0], [5.0, 6.0]].into_dyn(),
                ["lat", "lon"],
                Default::default(),
            ),
        );

        let err = TargetGrid::from_source(&ds).unwrap_err();
        assert!(matches!(err, GridMapError::DimensionMismatch(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let grid = sample_grid();
        let json = serde_json::to_string(&grid).unwrap();
        let back: TargetGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
