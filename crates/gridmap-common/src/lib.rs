//! Common types and utilities shared across the gridmap crates.

pub mod attributed;
pub mod error;
pub mod grid;
pub mod points;
pub mod source;

pub use attributed::{AttrValue, AttributedArray, Attributes};
pub use error::{GridMapError, Result};
pub use grid::TargetGrid;
pub use points::{PointCollection, PointSet};
pub use source::{MemoryDataset, MemoryVariable, VariableSource};
