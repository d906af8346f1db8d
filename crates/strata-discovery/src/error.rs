//! Discovery error types for strata-discovery.

use strata_config::ConfigError;

/// Errors from building a tier scorer. Tiering itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Cut points or duration window did not validate.
    #[error("invalid discovery configuration: {0}")]
    Config(#[from] ConfigError),
}
