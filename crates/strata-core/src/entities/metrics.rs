use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Criterion;

/// Per-criterion specificity sub-scores, each in `[0, 10]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SpecificityBreakdown {
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

impl SpecificityBreakdown {
    /// Build a breakdown by evaluating `score` once per criterion, in rubric order.
    pub fn from_fn(mut score: impl FnMut(Criterion) -> f64) -> Self {
        let mut breakdown = Self::default();
        for criterion in Criterion::ALL {
            *breakdown.slot_mut(criterion) = score(criterion);
        }
        breakdown
    }

    #[must_use]
    pub const fn get(&self, criterion: Criterion) -> f64 {
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

    fn slot_mut(&mut self, criterion: Criterion) -> &mut f64 {
        match criterion {
            Criterion::StrikeSelection => &mut self.strike_selection,
            Criterion::EntryCriteria => &mut self.entry_criteria,
            Criterion::Dte => &mut self.dte,
            Criterion::BuyingPowerEffect => &mut self.buying_power_effect,
            Criterion::ProfitTarget => &mut self.profit_target,
            Criterion::StopLoss => &mut self.stop_loss,
            Criterion::Adjustments => &mut self.adjustments,
            Criterion::FailureModes => &mut self.failure_modes,
            Criterion::RealPnl => &mut self.real_pnl,
            Criterion::BacktestEvidence => &mut self.backtest_evidence,
        }
    }

    /// `(criterion, sub-score)` pairs in rubric order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Quality grades derived from one source's extracted strategy.
///
/// Always recomputed from the strategy; never edited on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct QualityMetrics {
    /// Weighted specificity in `[0, 10]`, rounded to one decimal.
    pub specificity_score: f64,
    pub specificity_breakdown: SpecificityBreakdown,
    /// Trust/bias grade in `[0, 10]`, rounded to one decimal.
    pub trust_score: f64,
    pub has_backtest: bool,
    pub has_real_pnl: bool,
    /// Criteria below the gap threshold, in rubric order.
    pub gaps: Vec<Criterion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_fills_every_slot() {
        let breakdown = SpecificityBreakdown::from_fn(|c| {
            Criterion::ALL.iter().position(|x| *x == c).unwrap() as f64
        });
        let values: Vec<f64> = breakdown.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert!((breakdown.get(Criterion::StopLoss) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_serializes_with_criterion_keys() {
        let json = serde_json::to_value(SpecificityBreakdown::default()).unwrap();
        let map = json.as_object().unwrap();
        for criterion in Criterion::ALL {
            assert!(map.contains_key(criterion.as_str()), "{criterion}");
        }
    }
}
