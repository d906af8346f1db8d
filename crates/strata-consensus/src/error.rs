//! Consensus error types for strata-consensus.

use strata_config::ConfigError;

/// Errors from building a synthesizer. Synthesis itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    /// Thresholds or tolerance did not validate.
    #[error("invalid consensus configuration: {0}")]
    Config(#[from] ConfigError),
}
