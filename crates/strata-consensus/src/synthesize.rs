//! Topic-by-topic synthesis of a source batch.

use std::cmp::Ordering;

use strata_config::ConsensusConfig;
use strata_core::entities::{
    ConsensusItem, ConsensusReport, Controversy, ExtractedStrategy, Position, Source,
};
use strata_core::enums::{AgreementStrength, Topic};
use strata_core::field::{NumericField, TextField};

use crate::bucket::{Bucket, Bucketer, TopicValue};
use crate::error::ConsensusError;

/// Coverage label for sources that never discuss how the strategy fails.
const FAILURE_MODES_GAP: &str = "failure_modes";
/// Coverage label for sources without a win rate.
const BACKTEST_GAP: &str = "backtest_evidence";

fn text_value(field: &TextField) -> Option<TopicValue> {
    field.value().map(|v| TopicValue::Text(v.clone()))
}

fn numeric_value(field: &NumericField) -> Option<TopicValue> {
    field.value().map(|v| TopicValue::Numeric(*v))
}

/// The value a strategy states for a topic, if any.
#[must_use]
pub fn topic_value(strategy: &ExtractedStrategy, topic: Topic) -> Option<TopicValue> {
    let setup = &strategy.setup_rules;
    let management = &strategy.management_rules;
    match topic {
        Topic::Underlying => text_value(&setup.underlying),
        Topic::OptionType => text_value(&setup.option_type),
        Topic::StrikeSelection => text_value(&setup.strike_selection),
        Topic::Dte => numeric_value(&setup.dte),
        Topic::Delta => numeric_value(&setup.delta),
        Topic::EntryCriteria => text_value(&setup.entry_criteria),
        Topic::ProfitTarget => text_value(&management.profit_target),
        Topic::StopLoss => text_value(&management.stop_loss),
        Topic::Adjustments => text_value(&management.adjustment_rules)
            .or_else(|| text_value(&management.rolling_rules))
            .or_else(|| text_value(&management.defensive_maneuvers)),
        Topic::TimeExit => text_value(&management.time_exit),
    }
}

/// What one topic contributed to the report.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicOutcome {
    Consensus(ConsensusItem),
    Controversy(Controversy),
    /// No source stated a usable value.
    Unaddressed,
}

/// Builds consensus reports from scored sources.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: ConsensusConfig,
    bucketer: Bucketer,
}

impl Synthesizer {
    /// # Errors
    ///
    /// Returns [`ConsensusError::Config`] if thresholds or tolerance are invalid.
    pub fn new(config: ConsensusConfig) -> Result<Self, ConsensusError> {
        config.validate()?;
        let bucketer = Bucketer::new(config.normalization, config.numeric_tolerance);
        Ok(Self { config, bucketer })
    }

    #[must_use]
    pub const fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    /// Synthesize a report. Sources should already carry their final
    /// quality metrics; tie-breaks read their specificity scores.
    #[must_use]
    pub fn synthesize(&self, sources: &[Source]) -> ConsensusReport {
        if sources.is_empty() {
            return ConsensusReport::default();
        }

        let mut report = ConsensusReport {
            sources_analyzed: sources.len(),
            ..ConsensusReport::default()
        };

        for topic in Topic::ALL {
            match self.analyze_topic(topic, sources) {
                TopicOutcome::Consensus(item) => report.consensus.push(item),
                TopicOutcome::Controversy(controversy) => report.controversies.push(controversy),
                TopicOutcome::Unaddressed => {}
            }
        }

        report.gaps = self.gaps(sources);
        tracing::debug!(
            sources = sources.len(),
            consensus = report.consensus.len(),
            controversies = report.controversies.len(),
            gaps = report.gaps.len(),
            "synthesized consensus report"
        );
        report
    }

    /// Classify one topic across the batch.
    #[must_use]
    pub fn analyze_topic(&self, topic: Topic, sources: &[Source]) -> TopicOutcome {
        let values: Vec<(usize, TopicValue)> = sources
            .iter()
            .enumerate()
            .filter_map(|(i, s)| topic_value(&s.extracted_data, topic).map(|v| (i, v)))
            .collect();

        let mut buckets = self.bucketer.bucket(&values);
        let total: usize = buckets.iter().map(Bucket::len).sum();
        if total == 0 {
            return TopicOutcome::Unaddressed;
        }

        // Stable: equal sizes keep first-seen order.
        buckets.sort_by(|a, b| b.len().cmp(&a.len()));
        let winner = winning_bucket(&buckets, sources);

        #[allow(clippy::cast_precision_loss)]
        let agreement_rate = buckets[winner].len() as f64 / total as f64;

        if agreement_rate >= self.config.agreement_threshold {
            let strength = if agreement_rate >= self.config.strong_agreement_threshold {
                AgreementStrength::Strong
            } else {
                AgreementStrength::Moderate
            };
            tracing::debug!(%topic, agreement_rate, %strength, "topic reached consensus");

            let winning = &buckets[winner];
            let positions = buckets
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != winner)
                .map(|(_, b)| position(b, sources))
                .collect();
            return TopicOutcome::Consensus(ConsensusItem {
                topic,
                consensus_value: winning.representative.clone(),
                agreement_rate,
                strength,
                positions,
                sources: ids(&winning.members, sources),
            });
        }

        tracing::debug!(%topic, agreement_rate, positions = buckets.len(), "topic is contested");
        let mut contributors: Vec<usize> = buckets.iter().flat_map(|b| b.members.clone()).collect();
        contributors.sort_unstable();
        TopicOutcome::Controversy(Controversy {
            topic,
            agreement_rate,
            positions: buckets.iter().map(|b| position(b, sources)).collect(),
            sources: ids(&contributors, sources),
        })
    }

    /// Topics and coverage checks more than `gap_missing_ratio` of sources lack.
    ///
    /// Independent of consensus: a topic the few stating sources agree on is
    /// still a gap when most sources leave it out, so it can appear in both lists.
    fn gaps(&self, sources: &[Source]) -> Vec<String> {
        #[allow(clippy::cast_precision_loss)]
        let limit = self.config.gap_missing_ratio * sources.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let exceeds = |missing: usize| missing as f64 > limit;

        let mut gaps: Vec<String> = Topic::ALL
            .into_iter()
            .filter(|topic| {
                let missing = sources
                    .iter()
                    .filter(|s| {
                        topic_value(&s.extracted_data, *topic)
                            .is_none_or(|v| !self.bucketer.accepts(&v))
                    })
                    .count();
                exceeds(missing)
            })
            .map(|topic| topic.as_str().to_string())
            .collect();

        let no_failure_modes = sources
            .iter()
            .filter(|s| {
                let analysis = &s.extracted_data.failure_analysis;
                analysis.named_modes() == 0 && !analysis.discusses_losses
            })
            .count();
        if exceeds(no_failure_modes) {
            gaps.push(FAILURE_MODES_GAP.to_string());
        }

        let no_win_rate = sources
            .iter()
            .filter(|s| !s.extracted_data.risk_profile.win_rate.is_present())
            .count();
        if exceeds(no_win_rate) {
            gaps.push(BACKTEST_GAP.to_string());
        }
        gaps
    }
}

/// Index of the winning bucket in a size-sorted list: the largest, then the
/// highest average specificity, then the earliest.
#[allow(clippy::cast_precision_loss)]
fn winning_bucket(buckets: &[Bucket], sources: &[Source]) -> usize {
    let top = buckets.first().map_or(0, Bucket::len);
    let average = |bucket: &Bucket| {
        let sum: f64 = bucket
            .members
            .iter()
            .map(|&i| sources[i].quality_metrics.specificity_score)
            .sum();
        sum / bucket.len() as f64
    };

    let mut best = 0;
    for (i, bucket) in buckets.iter().enumerate().skip(1) {
        if bucket.len() < top {
            break;
        }
        if average(bucket).partial_cmp(&average(&buckets[best])) == Some(Ordering::Greater) {
            best = i;
        }
    }
    best
}

fn ids(members: &[usize], sources: &[Source]) -> Vec<String> {
    members.iter().map(|&i| sources[i].id.clone()).collect()
}

fn position(bucket: &Bucket, sources: &[Source]) -> Position {
    Position {
        value: bucket.representative.clone(),
        source_count: bucket.len(),
        sources: ids(&bucket.members, sources),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strata_core::enums::SourceType;
    use strata_core::field::{NumericValue, parse_numeric_text};

    fn source(id: &str, build: impl FnOnce(&mut ExtractedStrategy)) -> Source {
        let mut data = ExtractedStrategy::default();
        build(&mut data);
        Source::new(id, format!("https://example.com/{id}"), SourceType::Article, data)
    }

    fn synthesizer() -> Synthesizer {
        Synthesizer::new(ConsensusConfig::default()).unwrap()
    }

    #[test]
    fn empty_batch_yields_empty_report() {
        assert_eq!(synthesizer().synthesize(&[]), ConsensusReport::default());
    }

    #[test]
    fn adjustments_fall_back_to_rolling_rules() {
        let s = source("a", |d| {
            d.management_rules.rolling_rules = TextField::explicit("roll at 21 DTE".into(), 0.8);
        });
        assert_eq!(
            topic_value(&s.extracted_data, Topic::Adjustments),
            Some(TopicValue::Text("roll at 21 DTE".into()))
        );
    }

    #[test]
    fn majority_with_dissent_is_moderate_consensus() {
        let with_dte = |id: &str, text: &str| {
            let dte = NumericField::explicit(parse_numeric_text(text).unwrap(), 0.9);
            source(id, |d| d.setup_rules.dte = dte)
        };
        let sources = vec![with_dte("a", "5-7"), with_dte("b", "30-45"), with_dte("c", "30-45")];

        let TopicOutcome::Consensus(item) = synthesizer().analyze_topic(Topic::Dte, &sources) else {
            panic!("expected consensus at the default threshold");
        };
        assert_eq!(item.consensus_value, "30-45");
        assert_eq!(item.strength, AgreementStrength::Moderate);
        assert_eq!(item.sources, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(item.positions.len(), 1);
        assert_eq!(item.positions[0].value, "5-7");
    }

    #[test]
    fn tie_goes_to_more_specific_bucket() {
        let mut sources = vec![
            source("a", |d| d.setup_rules.underlying = TextField::explicit("SPY".into(), 1.0)),
            source("b", |d| d.setup_rules.underlying = TextField::explicit("SPX".into(), 1.0)),
        ];
        sources[0].quality_metrics.specificity_score = 3.0;
        sources[1].quality_metrics.specificity_score = 7.5;

        let config = ConsensusConfig {
            agreement_threshold: 0.5,
            ..ConsensusConfig::default()
        };
        let outcome = Synthesizer::new(config).unwrap().analyze_topic(Topic::Underlying, &sources);
        let TopicOutcome::Consensus(item) = outcome else {
            panic!("expected consensus");
        };
        assert_eq!(item.consensus_value, "SPX");
        assert_eq!(item.positions[0].value, "SPY");
    }

    #[test]
    fn equal_specificity_tie_keeps_first_seen() {
        let sources = vec![
            source("a", |d| d.setup_rules.underlying = TextField::explicit("SPY".into(), 1.0)),
            source("b", |d| d.setup_rules.underlying = TextField::explicit("SPX".into(), 1.0)),
        ];
        let config = ConsensusConfig {
            agreement_threshold: 0.5,
            ..ConsensusConfig::default()
        };
        let outcome = Synthesizer::new(config).unwrap().analyze_topic(Topic::Underlying, &sources);
        let TopicOutcome::Consensus(item) = outcome else {
            panic!("expected consensus");
        };
        assert_eq!(item.consensus_value, "SPY");
    }

    #[test]
    fn unaddressed_topic_is_a_gap() {
        let sources = vec![
            source("a", |d| {
                d.setup_rules.delta = NumericField::explicit(NumericValue::Scalar(0.16), 0.9);
                d.risk_profile.win_rate = strata_core::field::ScalarField::explicit(0.8, 0.9);
                d.failure_analysis.discusses_losses = true;
            }),
            source("b", |_| {}),
        ];
        let report = synthesizer().synthesize(&sources);
        assert!(report.gaps.contains(&"underlying".to_string()));
        // 1 of 2 missing is not more than half
        assert!(!report.gaps.contains(&"delta".to_string()));
        assert!(!report.gaps.contains(&FAILURE_MODES_GAP.to_string()));
        assert!(!report.gaps.contains(&BACKTEST_GAP.to_string()));
        assert_eq!(report.consensus.len(), 1);
        assert_eq!(report.consensus[0].topic, Topic::Delta);
    }

    #[test]
    fn coverage_gaps_are_appended_after_topics() {
        let sources = vec![source("a", |_| {}), source("b", |_| {}), source("c", |_| {})];
        let report = synthesizer().synthesize(&sources);
        let mut expected: Vec<String> = Topic::ALL.iter().map(|t| t.as_str().to_string()).collect();
        expected.push(FAILURE_MODES_GAP.to_string());
        expected.push(BACKTEST_GAP.to_string());
        assert_eq!(report.gaps, expected);
        assert!(report.consensus.is_empty());
        assert!(report.controversies.is_empty());
        assert_eq!(report.sources_analyzed, 3);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ConsensusConfig {
            agreement_threshold: 1.5,
            ..ConsensusConfig::default()
        };
        assert!(matches!(Synthesizer::new(config), Err(ConsensusError::Config(_))));
    }
}
