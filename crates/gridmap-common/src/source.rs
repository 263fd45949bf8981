//! Structured-file variable access.
//!
//! File formats themselves live outside this workspace. Anything that can
//! hand out a variable's values, dimension names and attributes, plus the
//! length of each named dimension, implements [`VariableSource`] and can be
//! read into an [`crate::AttributedArray`].

use std::collections::BTreeMap;

use ndarray::ArrayD;

use crate::attributed::Attributes;
use crate::error::{GridMapError, Result};

/// Read access to named variables of a structured dataset.
pub trait VariableSource {
    /// Raw values of a variable.
    fn variable_values(&self, name: &str) -> Result<ArrayD<f64>>;

    /// Ordered dimension names of a variable.
    fn variable_dimensions(&self, name: &str) -> Result<Vec<String>>;

    /// Attributes of a variable.
    fn variable_attributes(&self, name: &str) -> Result<Attributes>;

    /// Declared length of a dimension, if the dataset defines it.
    fn dimension_len(&self, dim: &str) -> Option<usize>;
}

/// A variable held in a [`MemoryDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryVariable {
    /// Raw values.
    pub values: ArrayD<f64>,
    /// Dimension names, one per axis.
    pub dimensions: Vec<String>,
    pub attributes: Attributes,
}

impl MemoryVariable {
    /// Create a variable from values, dimension names and attributes.
    pub fn new<S, I>(values: ArrayD<f64>, dimensions: I, attributes: Attributes) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            values,
            dimensions: dimensions.into_iter().map(Into::into).collect(),
            attributes,
        }
    }
}

/// An in-memory dataset of named dimensions and variables.
///
/// Nothing is validated on insertion; consistency between a variable and
/// the declared dimension lengths is checked by whoever reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDataset {
    dimensions: BTreeMap<String, usize>,
    variables: BTreeMap<String, MemoryVariable>,
}

impl MemoryDataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or redeclare) a dimension.
    pub fn define_dimension(&mut self, name: impl Into<String>, len: usize) -> &mut Self {
        self.dimensions.insert(name.into(), len);
        self
    }

    /// Store a variable, replacing any previous one with the same name.
    pub fn put_variable(&mut self, name: impl Into<String>, variable: MemoryVariable) -> &mut Self {
        self.variables.insert(name.into(), variable);
        self
    }

    /// Look up a stored variable.
    pub fn variable(&self, name: &str) -> Option<&MemoryVariable> {
        self.variables.get(name)
    }

    /// Names of all stored variables.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    fn require(&self, name: &str) -> Result<&MemoryVariable> {
        self.variables
            .get(name)
            .ok_or_else(|| GridMapError::VariableNotFound(name.to_string()))
    }
}

impl VariableSource for MemoryDataset {
    fn variable_values(&self, name: &str) -> Result<ArrayD<f64>> {
        Ok(self.require(name)?.values.clone())
    }

    fn variable_dimensions(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.require(name)?.dimensions.clone())
    }

    fn variable_attributes(&self, name: &str) -> Result<Attributes> {
        Ok(self.require(name)?.attributes.clone())
    }

    fn dimension_len(&self, dim: &str) -> Option<usize> {
        self.dimensions.get(dim).copied()
    }
}
