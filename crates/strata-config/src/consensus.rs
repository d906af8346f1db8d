//! Consensus synthesis configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_range};

/// Default share of sources a bucket needs to count as consensus.
const fn default_agreement_threshold() -> f64 {
    0.6
}

/// Default share at which a consensus is labeled strong.
const fn default_strong_agreement_threshold() -> f64 {
    0.8
}

/// Default relative widening applied before comparing numeric intervals.
const fn default_numeric_tolerance() -> f64 {
    0.1
}

/// Default share of sources that must lack a topic for it to be a gap.
const fn default_gap_missing_ratio() -> f64 {
    0.5
}

const fn default_true() -> bool {
    true
}

/// How categorical values are normalized before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct NormalizationConfig {
    #[serde(default = "default_true")]
    pub case_insensitive: bool,

    /// Collapse runs of whitespace into one space.
    #[serde(default = "default_true")]
    pub collapse_whitespace: bool,

    /// Drop trailing `.`, `,`, `;`, `:` and `!`.
    #[serde(default = "default_true")]
    pub strip_trailing_punctuation: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            collapse_whitespace: true,
            strip_trailing_punctuation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConsensusConfig {
    /// A winning bucket at or above this share becomes a consensus item.
    #[serde(default = "default_agreement_threshold")]
    pub agreement_threshold: f64,

    /// Display threshold: consensus at or above this share is `strong`.
    #[serde(default = "default_strong_agreement_threshold")]
    pub strong_agreement_threshold: f64,

    /// Numeric intervals are widened by this fraction of their largest bound
    /// before testing overlap. `0.0` merges only overlapping intervals.
    #[serde(default = "default_numeric_tolerance")]
    pub numeric_tolerance: f64,

    /// A topic is a gap when strictly more than this share of sources lack it.
    #[serde(default = "default_gap_missing_ratio")]
    pub gap_missing_ratio: f64,

    #[serde(default)]
    pub normalization: NormalizationConfig,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            agreement_threshold: default_agreement_threshold(),
            strong_agreement_threshold: default_strong_agreement_threshold(),
            numeric_tolerance: default_numeric_tolerance(),
            gap_missing_ratio: default_gap_missing_ratio(),
            normalization: NormalizationConfig::default(),
        }
    }
}

impl ConsensusConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for thresholds outside `[0, 1]`,
    /// a strong threshold below the agreement threshold, or a negative tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "consensus.agreement_threshold",
            self.agreement_threshold,
            0.0,
            1.0,
        )?;
        check_range(
            "consensus.strong_agreement_threshold",
            self.strong_agreement_threshold,
            0.0,
            1.0,
        )?;
        if self.strong_agreement_threshold < self.agreement_threshold {
            return Err(ConfigError::invalid(
                "consensus.strong_agreement_threshold",
                "must not be below agreement_threshold",
            ));
        }
        check_range(
            "consensus.numeric_tolerance",
            self.numeric_tolerance,
            0.0,
            f64::MAX,
        )?;
        check_range(
            "consensus.gap_missing_ratio",
            self.gap_missing_ratio,
            0.0,
            1.0,
        )
    }
}
