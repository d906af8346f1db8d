//! Specificity rubric.
//!
//! Every criterion maps one or more extracted fields onto a 0-10 sub-score
//! using the interpretation band of the field:
//!
//! | interpretation | sub-score        |
//! |----------------|------------------|
//! | missing        | `0`              |
//! | inferred       | `1 + 3 * conf`   |
//! | implicit       | `4 + 3 * conf`   |
//! | explicit       | `7 + 3 * conf`   |
//!
//! Only an explicit value earns the configured detail bonus, and only when
//! the source adds a secondary quantitative detail (a width next to a delta,
//! a number inside a stop-loss rule, a drawdown next to a win rate). The
//! result is capped at 10, so every sub-score stays inside the band of the
//! interpretation that produced it.
//!
//! Sub-scores are non-decreasing in each contributing field's confidence:
//! every derivation is a max or a min over per-field bands, and bonus
//! conditions depend on presence and interpretation only.

use strata_config::ScoringConfig;
use strata_core::entities::{ExtractedStrategy, SpecificityBreakdown};
use strata_core::enums::{Criterion, Interpretation};
use strata_core::field::{ExtractedField, TextField};

use crate::error::ScoreError;
use crate::gaps::detect_gaps;
use crate::round1;

const MAX_SUBSCORE: f64 = 10.0;
const IMPLICIT_CEILING: f64 = 7.0;
const LOSS_DISCUSSION_ONLY: f64 = 5.0;
const FULL_FAILURE_MODE_COUNT: usize = 3;

/// Output of one specificity pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificityResult {
    /// Weighted score in `[0, 10]`, rounded to one decimal.
    pub score: f64,
    pub breakdown: SpecificityBreakdown,
    pub gaps: Vec<Criterion>,
}

/// Band value for one field, ignoring any bonus.
#[must_use]
pub fn field_band<V>(field: &ExtractedField<V>) -> f64 {
    if !field.is_present() {
        return 0.0;
    }
    band(field.interpretation, field.confidence)
}

fn band(interpretation: Interpretation, confidence: f64) -> f64 {
    let c = confidence.clamp(0.0, 1.0);
    match interpretation {
        Interpretation::Missing => 0.0,
        Interpretation::Inferred => 3.0f64.mul_add(c, 1.0),
        Interpretation::Implicit => 3.0f64.mul_add(c, 4.0),
        Interpretation::Explicit => 3.0f64.mul_add(c, 7.0),
    }
}

fn has_number(field: &TextField) -> bool {
    field
        .value()
        .is_some_and(|text| text.chars().any(|ch| ch.is_ascii_digit()))
}

/// Grades how actionable a strategy description is.
#[derive(Debug, Clone)]
pub struct SpecificityScorer {
    config: ScoringConfig,
}

impl SpecificityScorer {
    /// Build a scorer, validating weights and thresholds once.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::Config`] if the weights do not sum to 1.0 or a
    /// threshold is off the 0-10 scale.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a strategy: weighted total, per-criterion breakdown and gaps.
    #[must_use]
    pub fn score(&self, strategy: &ExtractedStrategy) -> SpecificityResult {
        let breakdown = self.breakdown(strategy);
        SpecificityResult {
            score: self.weighted_score(&breakdown),
            gaps: detect_gaps(&breakdown, self.config.gap_threshold),
            breakdown,
        }
    }

    #[must_use]
    pub fn breakdown(&self, strategy: &ExtractedStrategy) -> SpecificityBreakdown {
        SpecificityBreakdown::from_fn(|criterion| self.criterion_score(strategy, criterion))
    }

    /// `round(sum(weight * sub-score), 1)`, clamped to `[0, 10]`.
    #[must_use]
    pub fn weighted_score(&self, breakdown: &SpecificityBreakdown) -> f64 {
        let total: f64 = breakdown
            .iter()
            .map(|(criterion, score)| self.config.weights.weight(criterion) * score)
            .sum();
        round1(total).clamp(0.0, MAX_SUBSCORE)
    }

    /// Sub-score for one criterion.
    #[must_use]
    pub fn criterion_score(&self, strategy: &ExtractedStrategy, criterion: Criterion) -> f64 {
        let setup = &strategy.setup_rules;
        let management = &strategy.management_rules;
        let risk = &strategy.risk_profile;

        match criterion {
            Criterion::StrikeSelection => {
                let detail = setup.width.is_present()
                    || (setup.strike_selection.is_present() && setup.delta.is_present());
                self.field_with_bonus(&setup.strike_selection, detail)
                    .max(self.field_with_bonus(&setup.delta, detail))
            }
            Criterion::EntryCriteria => {
                self.best_text(&[&setup.entry_criteria, &setup.entry_timing])
            }
            Criterion::Dte => field_band(&setup.dte),
            Criterion::BuyingPowerEffect => self.best_text(&[&setup.buying_power_effect]),
            Criterion::ProfitTarget => self.best_text(&[&management.profit_target]),
            Criterion::StopLoss => self.best_text(&[&management.stop_loss]),
            Criterion::Adjustments => self.best_text(&[
                &management.adjustment_rules,
                &management.rolling_rules,
                &management.defensive_maneuvers,
            ]),
            Criterion::FailureModes => self.failure_modes(strategy),
            Criterion::RealPnl => self.real_pnl(strategy),
            Criterion::BacktestEvidence => {
                self.field_with_bonus(&risk.win_rate, risk.max_drawdown.is_present())
            }
        }
    }

    /// Add the detail bonus to an explicit base. Inferred and implicit bases
    /// never leave their band.
    fn with_bonus(&self, base: f64, explicit: bool, detail: bool) -> f64 {
        if explicit && detail && base > 0.0 {
            (base + self.config.detail_bonus).min(MAX_SUBSCORE)
        } else {
            base.min(MAX_SUBSCORE)
        }
    }

    fn field_with_bonus<V>(&self, field: &ExtractedField<V>, detail: bool) -> f64 {
        let explicit = matches!(field.interpretation, Interpretation::Explicit);
        self.with_bonus(field_band(field), explicit, detail)
    }

    /// Best of several text fields, each earning the bonus if it carries a number.
    fn best_text(&self, fields: &[&TextField]) -> f64 {
        fields
            .iter()
            .map(|field| self.field_with_bonus(field, has_number(field)))
            .fold(0.0, f64::max)
    }

    fn failure_modes(&self, strategy: &ExtractedStrategy) -> f64 {
        let analysis = &strategy.failure_analysis;
        let named = analysis.named_modes();
        if named == 0 {
            // Loss talk without named modes sits in the implicit band.
            return if analysis.discusses_losses {
                LOSS_DISCUSSION_ONLY
            } else {
                0.0
            };
        }
        #[allow(clippy::cast_precision_loss)]
        let coverage = named.min(FULL_FAILURE_MODE_COUNT) as f64 / FULL_FAILURE_MODE_COUNT as f64;
        self.with_bonus(
            band(Interpretation::Explicit, coverage),
            true,
            analysis.max_drawdown_mentioned.is_some(),
        )
    }

    fn real_pnl(&self, strategy: &ExtractedStrategy) -> f64 {
        let claims = &strategy.performance_claims;
        let (start, end) = (&claims.starting_capital, &claims.ending_capital);
        if start.is_present() && end.is_present() {
            // The weaker figure bounds the grade; the bonus needs both explicit.
            let explicit = matches!(start.interpretation, Interpretation::Explicit)
                && matches!(end.interpretation, Interpretation::Explicit);
            return self.with_bonus(
                field_band(start).min(field_band(end)),
                explicit,
                claims.time_period.is_present(),
            );
        }
        field_band(&claims.total_return_percent).min(IMPLICIT_CEILING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strata_core::field::{NumericField, NumericRange, NumericValue, ScalarField};

    fn scorer() -> SpecificityScorer {
        SpecificityScorer::new(ScoringConfig::default()).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bands_follow_interpretation() {
        assert!(approx(field_band(&TextField::missing()), 0.0));
        assert!(approx(field_band(&TextField::inferred("x".into(), 0.0)), 1.0));
        assert!(approx(field_band(&TextField::inferred("x".into(), 1.0)), 4.0));
        assert!(approx(field_band(&TextField::implicit("x".into(), 0.5)), 5.5));
        assert!(approx(field_band(&TextField::explicit("x".into(), 1.0)), 10.0));
    }

    #[test]
    fn empty_strategy_scores_zero_with_every_gap() {
        let result = scorer().score(&ExtractedStrategy::default());
        assert!(approx(result.score, 0.0));
        assert_eq!(result.gaps, Criterion::ALL.to_vec());
    }

    #[test]
    fn strike_selection_bonus_for_width() {
        let mut strategy = ExtractedStrategy::default();
        strategy.setup_rules.delta = NumericField::explicit(NumericValue::Scalar(0.16), 0.5);
        let s = scorer();
        assert!(approx(s.criterion_score(&strategy, Criterion::StrikeSelection), 8.5));

        strategy.setup_rules.width = NumericField::explicit(NumericValue::Scalar(10.0), 1.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::StrikeSelection), 9.5));
    }

    #[test]
    fn width_alone_earns_nothing() {
        let mut strategy = ExtractedStrategy::default();
        strategy.setup_rules.width = NumericField::explicit(NumericValue::Scalar(10.0), 1.0);
        assert!(approx(
            scorer().criterion_score(&strategy, Criterion::StrikeSelection),
            0.0
        ));
    }

    #[test]
    fn stop_loss_bonus_requires_a_number() {
        let s = scorer();
        let mut strategy = ExtractedStrategy::default();
        strategy.management_rules.stop_loss = TextField::explicit("when it feels wrong".into(), 0.5);
        assert!(approx(s.criterion_score(&strategy, Criterion::StopLoss), 8.5));

        strategy.management_rules.stop_loss = TextField::explicit("2x credit received".into(), 0.5);
        assert!(approx(s.criterion_score(&strategy, Criterion::StopLoss), 9.5));
    }

    #[test]
    fn bonus_is_capped_at_ten() {
        let mut strategy = ExtractedStrategy::default();
        strategy.management_rules.profit_target = TextField::explicit("50% of max".into(), 1.0);
        assert!(approx(
            scorer().criterion_score(&strategy, Criterion::ProfitTarget),
            10.0
        ));
    }

    #[test]
    fn adjustments_take_the_best_rule() {
        let mut strategy = ExtractedStrategy::default();
        strategy.management_rules.adjustment_rules = TextField::inferred("roll out".into(), 1.0);
        strategy.management_rules.defensive_maneuvers =
            TextField::implicit("close the tested side".into(), 0.0);
        assert!(approx(
            scorer().criterion_score(&strategy, Criterion::Adjustments),
            4.0
        ));
    }

    #[test]
    fn dte_has_no_bonus() {
        let mut strategy = ExtractedStrategy::default();
        strategy.setup_rules.dte =
            NumericField::explicit(NumericValue::Range(NumericRange::new(30.0, 45.0)), 0.0);
        assert!(approx(scorer().criterion_score(&strategy, Criterion::Dte), 7.0));
    }

    #[test]
    fn failure_modes_scale_with_named_count() {
        let s = scorer();
        let mut strategy = ExtractedStrategy::default();
        strategy.failure_analysis.discusses_losses = true;
        assert!(approx(s.criterion_score(&strategy, Criterion::FailureModes), 5.0));

        strategy.failure_analysis.max_drawdown_mentioned = Some(22.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::FailureModes), 5.0));
        strategy.failure_analysis.max_drawdown_mentioned = None;

        strategy.failure_analysis.failure_modes_mentioned = vec!["gap down".into()];
        assert!(approx(s.criterion_score(&strategy, Criterion::FailureModes), 8.0));

        strategy.failure_analysis.failure_modes_mentioned =
            vec!["gap down".into(), "vol spike".into(), "assignment".into(), "".into()];
        strategy.failure_analysis.max_drawdown_mentioned = Some(22.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::FailureModes), 10.0));
    }

    #[test]
    fn real_pnl_prefers_capital_pair() {
        let s = scorer();
        let mut strategy = ExtractedStrategy::default();
        strategy.performance_claims.total_return_percent = ScalarField::explicit(275.0, 1.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::RealPnl), 7.0));

        strategy.performance_claims.starting_capital = ScalarField::explicit(3_200.0, 1.0);
        strategy.performance_claims.ending_capital = ScalarField::explicit(12_000.0, 0.5);
        assert!(approx(s.criterion_score(&strategy, Criterion::RealPnl), 8.5));

        strategy.performance_claims.time_period = TextField::explicit("2 years".into(), 0.9);
        assert!(approx(s.criterion_score(&strategy, Criterion::RealPnl), 9.5));
    }

    #[test]
    fn real_pnl_follows_the_weaker_capital_figure() {
        let s = scorer();
        let mut strategy = ExtractedStrategy::default();
        strategy.performance_claims.time_period = TextField::explicit("2 years".into(), 0.9);
        strategy.performance_claims.starting_capital = ScalarField::explicit(3_200.0, 1.0);
        strategy.performance_claims.ending_capital = ScalarField::implicit(12_000.0, 0.5);
        assert!(approx(s.criterion_score(&strategy, Criterion::RealPnl), 5.5));

        strategy.performance_claims.starting_capital = ScalarField::inferred(3_200.0, 0.0);
        strategy.performance_claims.ending_capital = ScalarField::inferred(12_000.0, 0.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::RealPnl), 1.0));
    }

    #[test]
    fn bonus_never_lifts_a_value_out_of_its_band() {
        let s = scorer();
        let mut strategy = ExtractedStrategy::default();
        strategy.management_rules.stop_loss = TextField::inferred("2x credit".into(), 1.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::StopLoss), 4.0));

        strategy.management_rules.profit_target = TextField::implicit("50% of max".into(), 1.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::ProfitTarget), 7.0));

        strategy.setup_rules.delta = NumericField::implicit(NumericValue::Scalar(0.16), 1.0);
        strategy.setup_rules.width = NumericField::explicit(NumericValue::Scalar(10.0), 1.0);
        assert!(approx(s.criterion_score(&strategy, Criterion::StrikeSelection), 7.0));
    }

    #[test]
    fn backtest_bonus_for_drawdown() {
        let mut strategy = ExtractedStrategy::default();
        strategy.risk_profile.win_rate = ScalarField::explicit(0.8, 0.5);
        strategy.risk_profile.max_drawdown = ScalarField::explicit(15.0, 1.0);
        assert!(approx(
            scorer().criterion_score(&strategy, Criterion::BacktestEvidence),
            9.5
        ));

        strategy.risk_profile.win_rate = ScalarField::implicit(0.8, 1.0);
        assert!(approx(
            scorer().criterion_score(&strategy, Criterion::BacktestEvidence),
            7.0
        ));
    }

    #[test]
    fn weighted_total_matches_breakdown() {
        let s = scorer();
        let breakdown = SpecificityBreakdown::from_fn(|_| 5.0);
        assert!(approx(s.weighted_score(&breakdown), 5.0));

        let mut strategy = ExtractedStrategy::default();
        strategy.management_rules.stop_loss = TextField::explicit("200% of credit".into(), 1.0);
        let result = s.score(&strategy);
        // 0.12 * 10 = 1.2
        assert!(approx(result.score, 1.2));
        assert!(!result.gaps.contains(&Criterion::StopLoss));
        assert_eq!(result.gaps.len(), 9);
    }

    #[test]
    fn custom_bonus_and_threshold() {
        let config = ScoringConfig {
            gap_threshold: 9.0,
            detail_bonus: 0.0,
            ..ScoringConfig::default()
        };
        let s = SpecificityScorer::new(config).unwrap();
        let mut strategy = ExtractedStrategy::default();
        strategy.management_rules.stop_loss = TextField::explicit("2x credit".into(), 0.5);
        let result = s.score(&strategy);
        assert!(approx(result.breakdown.stop_loss, 8.5));
        assert!(result.gaps.contains(&Criterion::StopLoss));
    }

    #[test]
    fn invalid_weights_fail_at_construction() {
        let mut config = ScoringConfig::default();
        config.weights.dte = 0.5;
        assert!(matches!(
            SpecificityScorer::new(config),
            Err(ScoreError::Config(_))
        ));
    }
}
