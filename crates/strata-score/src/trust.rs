//! Trust/bias rubric.
//!
//! Four binary factors, each worth 0 or 10, blended by the configured
//! weights. Independent of specificity: a vague source can be honest and a
//! precise one can be pure survivorship.

use strata_config::TrustWeights;
use strata_core::entities::ExtractedStrategy;
use strata_core::responses::{TrustAssessment, TrustBreakdown};

use crate::error::ScoreError;
use crate::round1;

const FACTOR_ON: f64 = 10.0;

const fn factor(on: bool) -> f64 {
    if on { FACTOR_ON } else { 0.0 }
}

/// Grades how balanced a source is about risk and losses.
#[derive(Debug, Clone)]
pub struct TrustScorer {
    weights: TrustWeights,
}

impl TrustScorer {
    /// # Errors
    ///
    /// Returns [`ScoreError::Config`] if the weights are out of range or do
    /// not sum to 1.0.
    pub fn new(weights: TrustWeights) -> Result<Self, ScoreError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    #[must_use]
    pub fn assess(&self, strategy: &ExtractedStrategy) -> TrustAssessment {
        let analysis = &strategy.failure_analysis;
        let breakdown = TrustBreakdown {
            discusses_losses: factor(analysis.discusses_losses),
            mentions_drawdown: factor(analysis.max_drawdown_mentioned.is_some()),
            shows_losing_trades: factor(strategy.performance_claims.shows_negative_period()),
            balanced_claims: factor(!analysis.bias_detected),
        };

        let w = &self.weights;
        let total = w.discusses_losses * breakdown.discusses_losses
            + w.mentions_drawdown * breakdown.mentions_drawdown
            + w.shows_losing_trades * breakdown.shows_losing_trades
            + w.balanced_claims * breakdown.balanced_claims;

        TrustAssessment {
            score: round1(total).clamp(0.0, FACTOR_ON),
            breakdown,
        }
    }

    #[must_use]
    pub fn score(&self, strategy: &ExtractedStrategy) -> f64 {
        self.assess(strategy).score
    }
}
