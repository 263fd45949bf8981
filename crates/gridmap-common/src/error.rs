//! Error types for gridmap operations.

use thiserror::Error;

/// Result type alias using GridMapError.
pub type Result<T> = std::result::Result<T, GridMapError>;

/// Primary error type for grid mapping operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridMapError {
    // === Locator Errors ===
    /// Query or target coordinate arrays cannot be paired.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    // === Inference Errors ===
    /// Sample arrays have zero length.
    #[error("empty input: {0}")]
    EmptyInput(String),

    // === Attributed Array Errors ===
    /// Dimension names do not agree with the data's axes.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    // === Collaborator Errors ===
    /// A variable source has no variable with this name.
    #[error("variable not found: {0}")]
    VariableNotFound(String),

    /// A value is unusable: not representable in the requested numeric type,
    /// or a coordinate that is NaN or infinite.
    #[error("invalid value in variable '{variable}': {message}")]
    InvalidValue { variable: String, message: String },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GridMapError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create an EmptyInput error.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Create an InvalidValue error.
    pub fn invalid_value(variable: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidValue {
            variable: variable.into(),
            message: msg.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<ndarray::ShapeError> for GridMapError {
    fn from(err: ndarray::ShapeError) -> Self {
        GridMapError::DimensionMismatch(err.to_string())
    }
}
