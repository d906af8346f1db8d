//! Specificity rubric configuration.

use serde::{Deserialize, Serialize};
use strata_core::enums::Criterion;

use crate::error::{ConfigError, check_range, check_weight_sum};

/// Default sub-score below which a criterion is reported as a gap.
const fn default_gap_threshold() -> f64 {
    3.0
}

/// Default bonus for a secondary quantitative detail.
const fn default_detail_bonus() -> f64 {
    1.0
}

/// Weight of each rubric criterion. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RubricWeights {
    pub strike_selection: f64,
    pub entry_criteria: f64,
    pub dte: f64,
    pub buying_power_effect: f64,
    pub profit_target: f64,
    pub stop_loss: f64,
    pub adjustments: f64,
    pub failure_modes: f64,
    pub real_pnl: f64,
    pub backtest_evidence: f64,
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self {
            strike_selection: 0.12,
            entry_criteria: 0.12,
            dte: 0.08,
            buying_power_effect: 0.12,
            profit_target: 0.08,
            stop_loss: 0.12,
            adjustments: 0.12,
            failure_modes: 0.08,
            real_pnl: 0.08,
            backtest_evidence: 0.08,
        }
    }
}

impl RubricWeights {
    #[must_use]
    pub const fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::StrikeSelection => self.strike_selection,
            Criterion::EntryCriteria => self.entry_criteria,
            Criterion::Dte => self.dte,
            Criterion::BuyingPowerEffect => self.buying_power_effect,
            Criterion::ProfitTarget => self.profit_target,
            Criterion::StopLoss => self.stop_loss,
            Criterion::Adjustments => self.adjustments,
            Criterion::FailureModes => self.failure_modes,
            Criterion::RealPnl => self.real_pnl,
            Criterion::BacktestEvidence => self.backtest_evidence,
        }
    }

    /// Check every weight is in `[0, 1]` and the table sums to 1.0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending weight.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for criterion in Criterion::ALL {
            check_range(
                &format!("scoring.weights.{criterion}"),
                self.weight(criterion),
                0.0,
                1.0,
            )?;
        }
        let weights = Criterion::ALL.map(|c| self.weight(c));
        check_weight_sum("scoring.weights", &weights)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: RubricWeights,

    /// Sub-scores strictly below this are gaps.
    #[serde(default = "default_gap_threshold")]
    pub gap_threshold: f64,

    /// Added (capped at 10) when an explicit value carries a secondary quantitative detail.
    #[serde(default = "default_detail_bonus")]
    pub detail_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: RubricWeights::default(),
            gap_threshold: default_gap_threshold(),
            detail_bonus: default_detail_bonus(),
        }
    }
}

impl ScoringConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for bad weights or thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        check_range("scoring.gap_threshold", self.gap_threshold, 0.0, 10.0)?;
        check_range("scoring.detail_bonus", self.detail_bonus, 0.0, 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let weights = RubricWeights::default();
        let total: f64 = Criterion::ALL.iter().map(|c| weights.weight(*c)).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn unbalanced_weights_are_rejected() {
        let config = ScoringConfig {
            weights: RubricWeights {
                stop_loss: 0.2,
                ..RubricWeights::default()
            },
            ..ScoringConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scoring.weights"));
    }

    #[test]
    fn negative_weight_is_rejected_even_if_sum_holds() {
        let weights = RubricWeights {
            stop_loss: -0.04,
            profit_target: 0.24,
            ..RubricWeights::default()
        };
        let err = weights.validate().unwrap_err();
        assert!(err.to_string().contains("scoring.weights.stop_loss"));
    }

    #[test]
    fn gap_threshold_must_be_on_score_scale() {
        let config = ScoringConfig {
            gap_threshold: 11.0,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
