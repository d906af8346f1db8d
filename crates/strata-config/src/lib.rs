//! # strata-config
//!
//! Layered configuration loading for Strata using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STRATA_*` prefix, `__` as separator)
//! 2. An explicit file passed by the caller (e.g. `strata --config`)
//! 3. Project-level `.strata/config.toml`
//! 4. User-level `~/.config/strata/config.toml`
//! 5. Built-in defaults
//!
//! Every load path validates the result once; scorers built from a
//! [`StrataConfig`] never re-check it per request.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STRATA_CONSENSUS__AGREEMENT_THRESHOLD` -> `consensus.agreement_threshold`,
//! `STRATA_SCORING__WEIGHTS__STOP_LOSS` -> `scoring.weights.stop_loss`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use strata_config::StrataConfig;
//!
//! let config = StrataConfig::load_with_dotenv().expect("config");
//! println!("consensus at {}", config.consensus.agreement_threshold);
//! ```

mod consensus;
mod discovery;
mod error;
mod scoring;
mod trust;

pub use consensus::{ConsensusConfig, NormalizationConfig};
pub use discovery::{CuratedSource, DiscoveryConfig, DiscoveryRules};
pub use error::ConfigError;
pub use scoring::{RubricWeights, ScoringConfig};
pub use trust::TrustWeights;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StrataConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub trust: TrustWeights,
    #[serde(default)]
    pub consensus: ConsensusConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl StrataConfig {
    /// Load and validate configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load with an extra TOML file layered above the project config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain without an extra file.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the figment provider chain, optionally with an explicit file.
    #[must_use]
    pub fn figment_with(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".strata/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("STRATA_").split("__"))
    }

    /// Check every section. Called once by each load path.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.trust.validate()?;
        self.consensus.validate()?;
        self.discovery.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("strata").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Silently does nothing
    /// if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace/)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
