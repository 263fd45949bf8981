//! Configuration for grid inference and locating.

use gridmap_common::{GridMapError, Result};
use serde::{Deserialize, Serialize};

/// Default rounding precision applied to samples before finding unique
/// coordinate values.
pub const DEFAULT_DECIMALS: i32 = 4;

/// Largest rounding precision (either sign) accepted by validation.
const MAX_DECIMALS: i32 = 15;

/// Configuration for grid inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridInferenceConfig {
    /// Decimal digits samples are rounded to before computing unique axis
    /// values. Negative values round to tens, hundreds, ...
    pub decimals: i32,

    /// Radius of the sphere coordinates are projected onto.
    pub radius: f64,
}

impl Default for GridInferenceConfig {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            radius: 1.0,
        }
    }
}

impl GridInferenceConfig {
    /// Default configuration with a different rounding precision.
    pub fn with_decimals(decimals: i32) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(-MAX_DECIMALS..=MAX_DECIMALS).contains(&self.decimals) {
            return Err(GridMapError::invalid_config(format!(
                "decimals must be within -{max}..={max}, got {}",
                self.decimals,
                max = MAX_DECIMALS
            )));
        }

        validate_radius(self.radius)
    }
}

/// Reject a projection radius that is not finite and positive.
pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GridMapError::invalid_config(format!(
            "radius must be finite and > 0, got {}",
            radius
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GridInferenceConfig::default();
        assert_eq!(config.decimals, 4);
        assert_eq!(config.radius, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GridInferenceConfig::with_decimals(-2);
        assert!(config.validate().is_ok());

        config.decimals = 16;
        assert!(config.validate().is_err());

        config = GridInferenceConfig::default();
        config.radius = 0.0;
        assert!(config.validate().is_err());

        config.radius = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(GridMapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_deserialize_fills_defaults() {
        let config: GridInferenceConfig = serde_json::from_str(r#"{"decimals": 2}"#).unwrap();
        assert_eq!(config.decimals, 2);
        assert_eq!(config.radius, 1.0);
    }
}
