//! Scoring error types for strata-score.

use strata_config::ConfigError;

/// Errors from building a scorer. Scoring itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// The rubric or trust configuration did not validate.
    #[error("invalid scoring configuration: {0}")]
    Config(#[from] ConfigError),
}
