//! Point-based quality tiering.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strata_config::DiscoveryConfig;
use strata_core::entities::{CandidateMetrics, DiscoveryCandidate};
use strata_core::enums::{QualitySignal, SourceType};
use strata_core::responses::TierAssessment;

use crate::error::DiscoveryError;

const MAX_SCORE: u32 = 100;

/// A candidate as handed over by a platform search, metrics still loose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub source_type: Option<SourceType>,
    #[serde(default)]
    pub metrics: Map<String, Value>,
}

/// Scores and tiers candidates using the configured rules.
#[derive(Debug, Clone)]
pub struct TierScorer {
    config: DiscoveryConfig,
    /// Lowercased trusted channel ids and names.
    trusted: HashSet<String>,
}

impl TierScorer {
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Config`] if the cut points or the duration
    /// window are invalid.
    pub fn new(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        config.validate()?;
        let trusted = config
            .trusted_channels
            .iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(Self { config, trusted })
    }

    #[must_use]
    pub const fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Whether the candidate is flagged trusted or its channel id or author is
    /// on the trusted list.
    #[must_use]
    pub fn is_trusted(&self, metrics: &CandidateMetrics, author: Option<&str>) -> bool {
        let listed = |name: &str| self.trusted.contains(&name.trim().to_lowercase());
        metrics.trusted
            || metrics.channel_id.as_deref().is_some_and(listed)
            || author.is_some_and(listed)
    }

    /// Apply every rule and map the capped total onto a tier.
    #[must_use]
    pub fn tier(&self, metrics: &CandidateMetrics, author: Option<&str>) -> TierAssessment {
        let rules = &self.config.rules;
        let mut score = 0u32;
        let mut signals = Vec::new();
        let mut fire = |on: bool, points: u8, signal: QualitySignal| {
            if on {
                score += u32::from(points);
                signals.push(signal);
            }
        };

        fire(
            metrics.views > rules.views_above,
            rules.views_points,
            QualitySignal::HighViews,
        );
        fire(
            metrics.subscribers > rules.subscribers_above,
            rules.subscribers_points,
            QualitySignal::LargeAudience,
        );
        fire(
            metrics.likes > rules.likes_above,
            rules.likes_points,
            QualitySignal::WellLiked,
        );
        fire(
            self.is_trusted(metrics, author),
            rules.trusted_points,
            QualitySignal::TrustedSource,
        );
        let window = rules.duration_min_minutes.saturating_mul(60)
            ..=rules.duration_max_minutes.saturating_mul(60);
        fire(
            metrics
                .duration_seconds
                .is_some_and(|secs| window.contains(&secs)),
            rules.duration_points,
            QualitySignal::IdealDuration,
        );

        let score = u8::try_from(score.min(MAX_SCORE)).unwrap_or(u8::MAX);
        TierAssessment {
            score,
            tier: self.config.tier_for(score),
            signals,
        }
    }

    /// Turn a raw platform result into a scored candidate.
    #[must_use]
    pub fn assess(&self, raw: RawCandidate) -> DiscoveryCandidate {
        let metrics = CandidateMetrics::from_loose(&raw.metrics);
        let author = (!raw.author.trim().is_empty()).then_some(raw.author.as_str());
        let assessment = self.tier(&metrics, author);
        tracing::debug!(
            url = %raw.url,
            score = assessment.score,
            tier = %assessment.tier,
            "tiered candidate"
        );
        DiscoveryCandidate {
            url: raw.url,
            title: raw.title,
            author: raw.author,
            source_type: raw.source_type,
            metrics,
            quality_score: assessment.score,
            quality_tier: assessment.tier,
            quality_signals: assessment.signals,
        }
    }

    /// Assess a batch and return it ranked.
    #[must_use]
    pub fn assess_all(&self, raws: Vec<RawCandidate>) -> Vec<DiscoveryCandidate> {
        rank(raws.into_iter().map(|raw| self.assess(raw)).collect())
    }
}

/// Order by descending score; equal scores keep input order.
#[must_use]
pub fn rank(mut candidates: Vec<DiscoveryCandidate>) -> Vec<DiscoveryCandidate> {
    candidates.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strata_config::DiscoveryRules;
    use strata_core::enums::QualityTier;

    fn scorer() -> TierScorer {
        TierScorer::new(DiscoveryConfig::default()).unwrap()
    }

    #[test]
    fn every_rule_fires() {
        let metrics = CandidateMetrics {
            views: 150_000,
            subscribers: 200_000,
            likes: 1_200,
            duration_seconds: Some(20 * 60),
            trusted: true,
            channel_id: None,
        };
        let assessment = scorer().tier(&metrics, None);
        assert_eq!(assessment.score, 100);
        assert_eq!(assessment.tier, QualityTier::High);
        assert_eq!(
            assessment.signals,
            vec![
                QualitySignal::HighViews,
                QualitySignal::LargeAudience,
                QualitySignal::WellLiked,
                QualitySignal::TrustedSource,
                QualitySignal::IdealDuration,
            ]
        );
    }

    #[test]
    fn nothing_known_is_low() {
        let assessment = scorer().tier(&CandidateMetrics::default(), None);
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.tier, QualityTier::Low);
        assert!(assessment.signals.is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        let metrics = CandidateMetrics {
            views: 100_000,
            subscribers: 100_001,
            likes: 1_000,
            ..CandidateMetrics::default()
        };
        let assessment = scorer().tier(&metrics, None);
        assert_eq!(assessment.score, 25);
        assert_eq!(assessment.signals, vec![QualitySignal::LargeAudience]);
    }

    #[test]
    fn duration_window_is_inclusive() {
        let s = scorer();
        for (secs, fires) in [(8 * 60, true), (30 * 60, true), (8 * 60 - 1, false), (30 * 60 + 1, false)] {
            let metrics = CandidateMetrics {
                duration_seconds: Some(secs),
                ..CandidateMetrics::default()
            };
            assert_eq!(s.tier(&metrics, None).score == 10, fires, "{secs}s");
        }
    }

    #[test]
    fn trusted_by_author_or_channel_ignoring_case() {
        let s = scorer();
        assert!(s.is_trusted(&CandidateMetrics::default(), Some("TastyTrade")));
        let metrics = CandidateMetrics {
            channel_id: Some("UCfMGjXY4el4ueVlYRMQVWJQ".into()),
            ..CandidateMetrics::default()
        };
        assert!(s.is_trusted(&metrics, Some("someone else")));
        assert!(!s.is_trusted(&CandidateMetrics::default(), Some("random guru")));
    }

    #[test]
    fn generous_rules_are_capped() {
        let config = DiscoveryConfig {
            rules: DiscoveryRules {
                views_points: 90,
                likes_points: 90,
                ..DiscoveryRules::default()
            },
            ..DiscoveryConfig::default()
        };
        let metrics = CandidateMetrics {
            views: 1_000_000,
            likes: 50_000,
            ..CandidateMetrics::default()
        };
        let assessment = TierScorer::new(config).unwrap().tier(&metrics, None);
        assert_eq!(assessment.score, 100);
    }

    #[test]
    fn ranking_is_stable() {
        let raws: Vec<RawCandidate> = serde_json::from_value(json!([
            { "url": "https://a", "metrics": { "likes": 5000 } },
            { "url": "https://b", "metrics": { "viewCount": "250,000", "likes": 5000 } },
            { "url": "https://c", "metrics": { "like_count": 5000 } },
            { "url": "https://d" }
        ]))
        .unwrap();
        let ranked = scorer().assess_all(raws);
        let urls: Vec<&str> = ranked.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://b", "https://a", "https://c", "https://d"]);
        assert_eq!(ranked[0].quality_score, 45);
        assert_eq!(ranked[0].quality_tier, QualityTier::Medium);
    }
}
