//! Numeric arrays carrying named dimensions and metadata attributes.
//!
//! An [`AttributedArray`] is the in-memory form of a structured-file
//! variable: the values, the ordered names of the axes they are laid out
//! along, and a free-form attribute mapping (`long_name`, `units`, ...).
//! It can be built from raw data or read from any [`VariableSource`].

use std::collections::BTreeMap;
use std::fmt;

use ndarray::{Array, ArrayD, ArrayView, Dimension, IxDyn};
use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::error::{GridMapError, Result};
use crate::source::VariableSource;

/// Ordered attribute mapping of an attributed array.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A single metadata attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Get the value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

/// Build an attribute mapping from key/value pairs.
pub fn attributes<K, V, I>(pairs: I) -> Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A numeric array with named dimensions and metadata attributes.
///
/// The dimension type `D` defaults to dynamic; fixed-rank arrays such as the
/// axes and mask of a [`crate::TargetGrid`] use `Ix1`/`Ix2` so that their
/// views need no runtime rank checks.
///
/// Invariants, checked at every construction path (including
/// deserialization):
/// - there is exactly one dimension name per data axis
/// - a name used for several axes refers to axes of equal length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "ArrayParts<T, D>",
    bound(
        serialize = "T: Serialize, D: Dimension + Serialize",
        deserialize = "T: Deserialize<'de>, D: Dimension + Deserialize<'de>"
    )
)]
pub struct AttributedArray<T, D: Dimension = IxDyn> {
    data: Array<T, D>,
    dimensions: Vec<String>,
    attributes: Attributes,
}

/// Unvalidated serialized form of an [`AttributedArray`].
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, D: Dimension + Deserialize<'de>"))]
struct ArrayParts<T, D: Dimension> {
    data: Array<T, D>,
    dimensions: Vec<String>,
    attributes: Attributes,
}

impl<T, D: Dimension> TryFrom<ArrayParts<T, D>> for AttributedArray<T, D> {
    type Error = GridMapError;

    fn try_from(parts: ArrayParts<T, D>) -> Result<Self> {
        Self::from_data(parts.data, parts.dimensions, parts.attributes)
    }
}

impl<T, D: Dimension> AttributedArray<T, D> {
    /// Wrap in-memory data with explicit dimension names and attributes.
    ///
    /// Fails with `DimensionMismatch` when the number of names differs from
    /// the number of data axes, or when a repeated name would describe axes
    /// of different lengths.
    pub fn from_data<S, I>(data: Array<T, D>, dimensions: I, attributes: Attributes) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let dimensions: Vec<String> = dimensions.into_iter().map(Into::into).collect();

        if dimensions.len() != data.ndim() {
            return Err(GridMapError::dimension_mismatch(format!(
                "{} dimension names {:?} for data with {} axes (shape {:?})",
                dimensions.len(),
                dimensions,
                data.ndim(),
                data.shape()
            )));
        }

        let shape = data.shape();
        for (i, name) in dimensions.iter().enumerate() {
            if let Some(j) = dimensions[..i].iter().position(|other| other == name) {
                if shape[i] != shape[j] {
                    return Err(GridMapError::dimension_mismatch(format!(
                        "dimension '{}' names axes of length {} and {}",
                        name, shape[j], shape[i]
                    )));
                }
            }
        }

        Ok(Self {
            data,
            dimensions,
            attributes,
        })
    }

    /// The array values.
    pub fn data(&self) -> &Array<T, D> {
        &self.data
    }

    /// A read-only view of the values.
    pub fn view(&self) -> ArrayView<'_, T, D> {
        self.data.view()
    }

    /// Consume the wrapper, returning the values.
    pub fn into_data(self) -> Array<T, D> {
        self.data
    }

    /// Dimension names, one per axis, in axis order.
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// All attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up a single attribute.
    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Set (or replace) an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Length of the named dimension, if the array has it.
    pub fn dim_len(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .position(|d| d == name)
            .map(|axis| self.data.shape()[axis])
    }

    /// Mapping from every dimension name to its length.
    pub fn dim_lengths(&self) -> BTreeMap<&str, usize> {
        self.dimensions
            .iter()
            .map(String::as_str)
            .zip(self.data.shape().iter().copied())
            .collect()
    }

    /// Shape of the values.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the array holds no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Erase the fixed rank.
    pub fn into_dyn(self) -> AttributedArray<T, IxDyn> {
        AttributedArray {
            data: self.data.into_dyn(),
            dimensions: self.dimensions,
            attributes: self.attributes,
        }
    }

    /// Convert to a fixed rank, failing with `DimensionMismatch` when the
    /// number of axes does not match.
    pub fn into_dimensionality<D2: Dimension>(self) -> Result<AttributedArray<T, D2>> {
        let data = self.data.into_dimensionality::<D2>()?;
        Ok(AttributedArray {
            data,
            dimensions: self.dimensions,
            attributes: self.attributes,
        })
    }
}

impl<T: NumCast> AttributedArray<T, IxDyn> {
    /// Read a named variable from a structured-file source.
    ///
    /// The source's declared dimension lengths must agree with the shape of
    /// the values it returns; each value is cast to `T`.
    pub fn from_variable<S>(source: &S, name: &str) -> Result<Self>
    where
        S: VariableSource + ?Sized,
    {
        let values = source.variable_values(name)?;
        let dimensions = source.variable_dimensions(name)?;
        let attributes = source.variable_attributes(name)?;

        if dimensions.len() != values.ndim() {
            return Err(GridMapError::dimension_mismatch(format!(
                "variable '{}' declares dimensions {:?} but has {} axes",
                name,
                dimensions,
                values.ndim()
            )));
        }

        for (axis, dim) in dimensions.iter().enumerate() {
            let declared = source.dimension_len(dim).ok_or_else(|| {
                GridMapError::dimension_mismatch(format!(
                    "variable '{}' uses undefined dimension '{}'",
                    name, dim
                ))
            })?;
            if declared != values.shape()[axis] {
                return Err(GridMapError::dimension_mismatch(format!(
                    "variable '{}': dimension '{}' has length {} but axis {} holds {} values",
                    name,
                    dim,
                    declared,
                    axis,
                    values.shape()[axis]
                )));
            }
        }

        let data = cast_values(name, values)?;
        Self::from_data(data, dimensions, attributes)
    }
}

fn cast_values<T: NumCast>(name: &str, values: ArrayD<f64>) -> Result<ArrayD<T>> {
    let shape = values.raw_dim();
    let cast = values
        .iter()
        .map(|&v| {
            T::from(v).ok_or_else(|| {
                GridMapError::invalid_value(
                    name,
                    format!("{} is not representable as {}", v, std::any::type_name::<T>()),
                )
            })
        })
        .collect::<Result<Vec<T>>>()?;
    Ok(ArrayD::from_shape_vec(shape, cast)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemoryDataset, MemoryVariable};
    use ndarray::{array, Array1, Ix1, Ix2};

    #[test]
    fn test_from_data_exposes_dimension_lengths() {
        let data = Array::zeros((3, 4)).into_dyn();
        let arr: AttributedArray<f64> = AttributedArray::from_data(
            data,
            ["lat", "lon"],
            attributes([("long_name", "domain mask")]),
        )
        .unwrap();

        assert_eq!(arr.dim_len("lat"), Some(3));
        assert_eq!(arr.dim_len("lon"), Some(4));
        assert_eq!(arr.dim_len("time"), None);
        assert_eq!(arr.ndim(), 2);
        assert_eq!(arr.len(), 12);
        assert_eq!(
            arr.attribute("long_name").and_then(AttrValue::as_str),
            Some("domain mask")
        );

        let lengths = arr.dim_lengths();
        assert_eq!(lengths.get("lat"), Some(&3));
        assert_eq!(lengths.get("lon"), Some(&4));
    }

    #[test]
    fn test_from_data_rejects_wrong_dimension_count() {
        let err = AttributedArray::from_data(Array1::<f64>::zeros(5), ["lat", "lon"], Attributes::new())
            .unwrap_err();
        assert!(matches!(err, GridMapError::DimensionMismatch(_)));
        assert!(err.to_string().contains("2 dimension names"));
    }

    #[test]
    fn test_from_data_rejects_inconsistent_repeated_dimension() {
        let err = AttributedArray::from_data(
            Array::<f64, _>::zeros((2, 3)),
            ["n", "n"],
            Attributes::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GridMapError::DimensionMismatch(_)));

        let square =
            AttributedArray::from_data(Array::<f64, _>::zeros((3, 3)), ["n", "n"], Attributes::new())
                .unwrap();
        assert_eq!(square.dim_len("n"), Some(3));
    }

    #[test]
    fn test_fixed_rank_round_trip() {
        let arr = AttributedArray::from_data(array![1.0, 2.0, 3.0], ["lon"], Attributes::new())
            .unwrap()
            .with_attribute("units", "degrees_east");

        let dynamic = arr.clone().into_dyn();
        assert_eq!(dynamic.shape(), &[3]);

        let back: AttributedArray<f64, Ix1> = dynamic.into_dimensionality().unwrap();
        assert_eq!(back, arr);

        let err = arr.into_dyn().into_dimensionality::<Ix2>().unwrap_err();
        assert!(matches!(err, GridMapError::DimensionMismatch(_)));
    }

    #[test]
    fn test_from_variable() {
        let mut ds = MemoryDataset::new();
        ds.define_dimension("lat", 2).define_dimension("lon", 3);
        ds.put_variable(
            "mask",
            MemoryVariable::new(
                array![[1.0, 0.0, 1.0], [0.0, 1.0, 0.0]].into_dyn(),
                ["lat", "lon"],
                attributes([("long_name", "domain mask")]),
            ),
        );

        let mask: AttributedArray<i32> = AttributedArray::from_variable(&ds, "mask").unwrap();
        assert_eq!(mask.shape(), &[2, 3]);
        assert_eq!(mask.dim_len("lon"), Some(3));
        assert_eq!(mask.data()[[1, 1]], 1);
        assert_eq!(mask.dimensions(), &["lat".to_string(), "lon".to_string()]);
    }

    #[test]
    fn test_from_variable_checks_declared_lengths() {
        let mut ds = MemoryDataset::new();
        ds.define_dimension("lon", 4);
        ds.put_variable(
            "lon",
            MemoryVariable::new(array![0.0, 1.0, 2.0].into_dyn(), ["lon"], Attributes::new()),
        );

        let err = AttributedArray::<f64>::from_variable(&ds, "lon").unwrap_err();
        assert!(matches!(err, GridMapError::DimensionMismatch(_)));
    }

    #[test]
    fn test_from_variable_rejects_unrepresentable_values() {
        let mut ds = MemoryDataset::new();
        ds.define_dimension("n", 2);
        ds.put_variable(
            "mask",
            MemoryVariable::new(array![1.0, f64::NAN].into_dyn(), ["n"], Attributes::new()),
        );

        let err = AttributedArray::<i32>::from_variable(&ds, "mask").unwrap_err();
        assert!(matches!(err, GridMapError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_variable_missing() {
        let ds = MemoryDataset::new();
        let err = AttributedArray::<f64>::from_variable(&ds, "lat").unwrap_err();
        assert_eq!(err, GridMapError::VariableNotFound("lat".to_string()));
    }

    #[test]
    fn test_deserialize_validates_dimensions() {
        let arr = AttributedArray::from_data(array![[1, 0], [0, 1]], ["lat", "lon"], Attributes::new())
            .unwrap()
            .with_attribute("long_name", "domain mask");
        let json = serde_json::to_string(&arr).unwrap();
        let back: AttributedArray<i32, Ix2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, arr);

        let bad = json.replace(r#"["lat","lon"]"#, r#"["lat"]"#);
        assert!(serde_json::from_str::<AttributedArray<i32, Ix2>>(&bad).is_err());
    }

    #[test]
    fn test_attr_value_conversions() {
        assert_eq!(AttrValue::from("degrees_east").as_str(), Some("degrees_east"));
        assert_eq!(AttrValue::from(3_i64).as_f64(), Some(3.0));
        assert_eq!(AttrValue::from(1.5).as_f64(), Some(1.5));
        assert_eq!(AttrValue::from(1.5).as_str(), None);
        assert_eq!(AttrValue::from("x").to_string(), "x");
    }
}
