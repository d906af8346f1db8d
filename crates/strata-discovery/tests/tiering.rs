//! Tiering from loosely typed platform metrics.

use pretty_assertions::assert_eq;
use serde_json::json;

use strata_config::{DiscoveryConfig, StrataConfig};
use strata_core::enums::{QualitySignal, QualityTier};
use strata_discovery::curated::match_curated;
use strata_discovery::{RawCandidate, TierScorer};

fn raw(value: serde_json::Value) -> RawCandidate {
    serde_json::from_value(value).expect("valid candidate")
}

#[test]
fn full_marks_candidate() {
    let scorer = TierScorer::new(DiscoveryConfig::default()).unwrap();
    let candidate = scorer.assess(raw(json!({
        "url": "https://www.youtube.com/watch?v=abc",
        "title": "SPX put credit spreads, 2 years of results",
        "author": "Some Trader",
        "source_type": "video",
        "metrics": {
            "views": 150000,
            "subscribers": 200000,
            "likes": 1200,
            "trusted": true,
            "duration_minutes": 20
        }
    })));

    assert_eq!(candidate.quality_score, 100);
    assert_eq!(candidate.quality_tier, QualityTier::High);
    assert_eq!(candidate.quality_signals.len(), 5);
}

#[test]
fn absent_metrics_are_low_tier() {
    let scorer = TierScorer::new(DiscoveryConfig::default()).unwrap();
    let candidate = scorer.assess(raw(json!({ "url": "https://www.reddit.com/r/options/x" })));
    assert_eq!(candidate.quality_score, 0);
    assert_eq!(candidate.quality_tier, QualityTier::Low);
    assert!(candidate.quality_signals.is_empty());
}

#[test]
fn trusted_author_and_duration_reach_medium() {
    let scorer = TierScorer::new(DiscoveryConfig::default()).unwrap();
    let candidate = scorer.assess(raw(json!({
        "url": "https://www.youtube.com/watch?v=def",
        "author": "Option Alpha",
        "metrics": { "viewCount": "20,500", "duration": "PT14M10S", "likeCount": "1,001" }
    })));
    assert_eq!(candidate.quality_score, 45);
    assert_eq!(candidate.quality_tier, QualityTier::Medium);
    assert_eq!(
        candidate.quality_signals,
        vec![
            QualitySignal::WellLiked,
            QualitySignal::TrustedSource,
            QualitySignal::IdealDuration,
        ]
    );
}

#[test]
fn cut_points_follow_configuration() {
    let config = DiscoveryConfig {
        high_tier_min: 20,
        medium_tier_min: 10,
        ..StrataConfig::default().discovery
    };
    let scorer = TierScorer::new(config).unwrap();
    let candidate = scorer.assess(raw(json!({
        "url": "https://x",
        "metrics": { "likes": 2000, "duration_seconds": 600 }
    })));
    assert_eq!(candidate.quality_score, 25);
    assert_eq!(candidate.quality_tier, QualityTier::High);
}

#[test]
fn curated_matches_carry_educator_signals() {
    let matches = match_curated(&DiscoveryConfig::default(), "wheel");
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0].quality_signals,
        vec![QualitySignal::CuratedSource, QualitySignal::KnownEducator]
    );
}

#[test]
fn invalid_cut_points_fail_construction() {
    let config = DiscoveryConfig {
        high_tier_min: 120,
        ..DiscoveryConfig::default()
    };
    assert!(TierScorer::new(config).is_err());
}
