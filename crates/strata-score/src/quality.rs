//! Combined per-source quality scoring and batch execution.

use rayon::prelude::*;
use strata_config::StrataConfig;
use strata_core::entities::{ExtractedStrategy, QualityMetrics, Source};
use strata_core::responses::SourceScore;

use crate::error::ScoreError;
use crate::specificity::SpecificityScorer;
use crate::trust::TrustScorer;

/// Sub-score at which backtest evidence counts as present.
const BACKTEST_FLOOR: f64 = 7.0;
/// Sub-score at which real P&L counts as shown.
const REAL_PNL_FLOOR: f64 = 4.0;

/// Specificity and trust scorers run side by side over one strategy.
#[derive(Debug, Clone)]
pub struct QualityScorer {
    specificity: SpecificityScorer,
    trust: TrustScorer,
}

impl QualityScorer {
    #[must_use]
    pub const fn new(specificity: SpecificityScorer, trust: TrustScorer) -> Self {
        Self { specificity, trust }
    }

    /// Build both scorers from the scoring and trust sections.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Config`] if either section fails validation.
    pub fn from_config(config: &StrataConfig) -> Result<Self, ScoreError> {
        Ok(Self::new(
            SpecificityScorer::new(config.scoring.clone())?,
            TrustScorer::new(config.trust)?,
        ))
    }

    #[must_use]
    pub const fn specificity(&self) -> &SpecificityScorer {
        &self.specificity
    }

    #[must_use]
    pub const fn trust(&self) -> &TrustScorer {
        &self.trust
    }

    /// Derive the full metrics for one strategy. Pure and deterministic.
    #[must_use]
    pub fn score(&self, strategy: &ExtractedStrategy) -> QualityMetrics {
        let specificity = self.specificity.score(strategy);
        let breakdown = specificity.breakdown;
        QualityMetrics {
            specificity_score: specificity.score,
            specificity_breakdown: breakdown,
            trust_score: self.trust.score(strategy),
            has_backtest: breakdown.backtest_evidence >= BACKTEST_FLOOR,
            has_real_pnl: breakdown.real_pnl >= REAL_PNL_FLOOR,
            gaps: specificity.gaps,
        }
    }

    /// Recompute a source's metrics in place and report what was coerced.
    pub fn score_source(&self, source: &mut Source) -> SourceScore {
        let warnings = source.extracted_data.field_issues();
        for warning in &warnings {
            tracing::warn!(source = %source.id, field = %warning.path, issue = %warning.issue, "coerced extracted field");
        }

        let metrics = self.score(&source.extracted_data);
        tracing::debug!(
            source = %source.id,
            specificity = metrics.specificity_score,
            trust = metrics.trust_score,
            gaps = metrics.gaps.len(),
            "scored source"
        );
        source.quality_metrics = metrics.clone();

        SourceScore {
            source_id: source.id.clone(),
            metrics,
            warnings,
        }
    }

    /// Score every source in parallel. Results come back in input order, one
    /// per source; a malformed source never affects its neighbours.
    pub fn score_batch(&self, sources: &mut [Source]) -> Vec<SourceScore> {
        sources
            .par_iter_mut()
            .map(|source| self.score_source(source))
            .collect()
    }
}
