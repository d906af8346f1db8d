//! Matching a free-text query against hand-picked educational sites.

use strata_config::{CuratedSource, DiscoveryConfig};
use strata_core::entities::{CandidateMetrics, DiscoveryCandidate};
use strata_core::enums::{QualitySignal, QualityTier, SourceType};

/// Query words shorter than this never match a topic on their own.
const MIN_WORD_LEN: usize = 3;

fn topic_matches(topic: &str, query: &str) -> bool {
    let topic = topic.to_lowercase();
    query.contains(&topic)
        || query
            .split_whitespace()
            .filter(|word| word.len() >= MIN_WORD_LEN)
            .any(|word| topic.contains(word))
}

/// Curated sources with a topic related to `query`, in configured order.
#[must_use]
pub fn match_curated(config: &DiscoveryConfig, query: &str) -> Vec<DiscoveryCandidate> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    config
        .curated_sources
        .iter()
        .filter(|source| source.topics.iter().any(|t| topic_matches(t, &query)))
        .map(|source| curated_candidate(config, source))
        .collect()
}

fn curated_candidate(config: &DiscoveryConfig, source: &CuratedSource) -> DiscoveryCandidate {
    let quality_score = match source.tier {
        QualityTier::High => config.high_tier_min,
        QualityTier::Medium => config.medium_tier_min,
        QualityTier::Low => 0,
    };
    DiscoveryCandidate {
        url: format!("https://{}", source.domain),
        title: format!("Curated: {}", source.domain),
        author: source.domain.clone(),
        source_type: Some(SourceType::Article),
        metrics: CandidateMetrics::default(),
        quality_score,
        quality_tier: source.tier,
        quality_signals: vec![QualitySignal::CuratedSource, QualitySignal::KnownEducator],
    }
}
