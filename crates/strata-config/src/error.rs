//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Reject a value outside `[min, max]` (or NaN).
pub(crate) fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_nan() || value < min || value > max {
        return Err(ConfigError::invalid(
            field,
            format!("{value} is outside [{min}, {max}]"),
        ));
    }
    Ok(())
}

/// Reject a weight table that does not sum to exactly 1.0 (within float noise).
pub(crate) fn check_weight_sum(field: &str, weights: &[f64]) -> Result<(), ConfigError> {
    let total: f64 = weights.iter().sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::invalid(
            field,
            format!("weights sum to {total}, expected 1.0"),
        ));
    }
    Ok(())
}

pub(crate) const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
