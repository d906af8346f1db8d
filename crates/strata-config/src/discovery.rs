//! Discovery quality-tiering configuration.

use serde::{Deserialize, Serialize};
use strata_core::enums::QualityTier;

use crate::error::ConfigError;

/// Point rules. Each fires independently; the total is capped at 100.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryRules {
    /// Views strictly above this earn `views_points`.
    pub views_above: u64,
    pub views_points: u8,
    pub subscribers_above: u64,
    pub subscribers_points: u8,
    pub likes_above: u64,
    pub likes_points: u8,
    pub trusted_points: u8,
    /// Inclusive duration window, in minutes.
    pub duration_min_minutes: u64,
    pub duration_max_minutes: u64,
    pub duration_points: u8,
}

impl Default for DiscoveryRules {
    fn default() -> Self {
        Self {
            views_above: 100_000,
            views_points: 30,
            subscribers_above: 100_000,
            subscribers_points: 25,
            likes_above: 1_000,
            likes_points: 15,
            trusted_points: 20,
            duration_min_minutes: 8,
            duration_max_minutes: 30,
            duration_points: 10,
        }
    }
}

/// A hand-picked educational site matched by topic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CuratedSource {
    pub domain: String,
    pub tier: QualityTier,
    pub topics: Vec<String>,
}

/// Default high-tier score cut point.
const fn default_high_tier_min() -> u8 {
    70
}

/// Default medium-tier score cut point.
const fn default_medium_tier_min() -> u8 {
    40
}

fn default_trusted_channels() -> Vec<String> {
    [
        "UCfMGjXY4el4ueVlYRMQVWJQ",
        "UCc4CZw0AnNPRPdpJoGQMsXg",
        "UCfMOHqxPRLCWqV1fZaAjF-g",
        "UCmVr1oU_PYVLZ4hHcjPGmRg",
        "UCE4CRLdLwXPBsmhNqU0G5Xw",
        "UCZ7sFfGqMLfDq3_m_zK97Ew",
        "tastytrade",
        "Option Alpha",
        "InTheMoney",
        "Theta Profits",
        "SMB Capital",
        "ProjectOption",
        "r/thetagang",
        "r/options",
        "r/optionstrading",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_curated_sources() -> Vec<CuratedSource> {
    let curated = |domain: &str, topics: &[&str]| CuratedSource {
        domain: domain.to_string(),
        tier: QualityTier::High,
        topics: topics.iter().map(|t| (*t).to_string()).collect(),
    };
    vec![
        curated(
            "tastytrade.com",
            &["credit spreads", "iron condor", "wheel", "options"],
        ),
        curated(
            "optionalpha.com",
            &["credit spreads", "iron condor", "options strategy"],
        ),
        curated("thetaprofits.com", &["put credit spreads", "spx", "spy"]),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_high_tier_min")]
    pub high_tier_min: u8,

    #[serde(default = "default_medium_tier_min")]
    pub medium_tier_min: u8,

    #[serde(default)]
    pub rules: DiscoveryRules,

    /// Channel ids or names (case-insensitive) that earn the trusted bonus.
    #[serde(default = "default_trusted_channels")]
    pub trusted_channels: Vec<String>,

    #[serde(default = "default_curated_sources")]
    pub curated_sources: Vec<CuratedSource>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            high_tier_min: default_high_tier_min(),
            medium_tier_min: default_medium_tier_min(),
            rules: DiscoveryRules::default(),
            trusted_channels: default_trusted_channels(),
            curated_sources: default_curated_sources(),
        }
    }
}

impl DiscoveryConfig {
    /// Map a score onto a tier using the configured cut points.
    #[must_use]
    pub const fn tier_for(&self, score: u8) -> QualityTier {
        if score >= self.high_tier_min {
            QualityTier::High
        } else if score >= self.medium_tier_min {
            QualityTier::Medium
        } else {
            QualityTier::Low
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless `medium <= high <= 100`
    /// and the duration window is ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.high_tier_min > 100 {
            return Err(ConfigError::invalid(
                "discovery.high_tier_min",
                format!("{} exceeds 100", self.high_tier_min),
            ));
        }
        if self.medium_tier_min > self.high_tier_min {
            return Err(ConfigError::invalid(
                "discovery.medium_tier_min",
                "must not exceed high_tier_min",
            ));
        }
        if self.rules.duration_min_minutes > self.rules.duration_max_minutes {
            return Err(ConfigError::invalid(
                "discovery.rules.duration_min_minutes",
                "must not exceed duration_max_minutes",
            ));
        }
        Ok(())
    }
}
