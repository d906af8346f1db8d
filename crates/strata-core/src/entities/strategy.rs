use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::field::{FieldWarning, NumericField, ScalarField, TextField};

/// Treat an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Strategy setup and entry rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SetupRules {
    pub underlying: TextField,
    pub option_type: TextField,
    pub strike_selection: TextField,
    pub dte: NumericField,
    pub width: NumericField,
    pub delta: NumericField,
    pub entry_criteria: TextField,
    pub entry_timing: TextField,
    pub buying_power_effect: TextField,
}

/// Strategy management and exit rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ManagementRules {
    pub profit_target: TextField,
    pub stop_loss: TextField,
    pub time_exit: TextField,
    pub adjustment_rules: TextField,
    pub rolling_rules: TextField,
    pub defensive_maneuvers: TextField,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RiskProfile {
    pub max_loss_per_trade: TextField,
    pub win_rate: ScalarField,
    pub risk_reward_ratio: TextField,
    pub max_drawdown: ScalarField,
}

/// P&L figures claimed by the author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PerformanceClaims {
    pub starting_capital: ScalarField,
    pub ending_capital: ScalarField,
    pub total_return_percent: ScalarField,
    pub time_period: TextField,
    pub profits_withdrawn: ScalarField,
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    /// Named periods the author reports losing money in.
    #[serde(deserialize_with = "null_as_default")]
    pub losing_periods: Vec<String>,
}

impl PerformanceClaims {
    /// Whether the claims include any evidence of a losing period.
    #[must_use]
    pub fn shows_negative_period(&self) -> bool {
        if self.total_return_percent.value().is_some_and(|r| *r < 0.0) {
            return true;
        }
        if let (Some(start), Some(end)) = (
            self.starting_capital.value(),
            self.ending_capital.value(),
        ) {
            if end < start {
                return true;
            }
        }
        self.losing_periods.iter().any(|p| !p.trim().is_empty())
    }
}

/// Survivorship-bias signals: does the author talk about how this fails?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FailureModeAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub failure_modes_mentioned: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub discusses_losses: bool,
    pub max_drawdown_mentioned: Option<f64>,
    pub recovery_strategy: Option<String>,
    /// Defaults to `true`: absent evidence of balance counts as bias.
    #[serde(deserialize_with = "bias_flag")]
    pub bias_detected: bool,
}

fn bias_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Option::<bool>::deserialize(deserializer).map(|flag| flag.unwrap_or(true))
}

impl Default for FailureModeAnalysis {
    fn default() -> Self {
        Self {
            failure_modes_mentioned: Vec::new(),
            discusses_losses: false,
            max_drawdown_mentioned: None,
            recovery_strategy: None,
            bias_detected: true,
        }
    }
}

impl FailureModeAnalysis {
    /// Named failure modes, ignoring blank entries.
    #[must_use]
    pub fn named_modes(&self) -> usize {
        self.failure_modes_mentioned
            .iter()
            .filter(|m| !m.trim().is_empty())
            .count()
    }
}

/// Everything the extraction step produced for one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractedStrategy {
    pub strategy_name: TextField,
    pub variation: TextField,
    pub trader_name: TextField,
    pub experience_level: TextField,

    #[serde(deserialize_with = "null_as_default")]
    pub setup_rules: SetupRules,
    #[serde(deserialize_with = "null_as_default")]
    pub management_rules: ManagementRules,
    #[serde(deserialize_with = "null_as_default")]
    pub risk_profile: RiskProfile,
    #[serde(deserialize_with = "null_as_default")]
    pub performance_claims: PerformanceClaims,
    #[serde(deserialize_with = "null_as_default", alias = "failure_mode_analysis")]
    pub failure_analysis: FailureModeAnalysis,

    #[serde(deserialize_with = "null_as_default")]
    pub key_insights: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub warnings: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub quotes: Vec<String>,
}

macro_rules! collect_issues {
    ($out:expr, $prefix:literal, $owner:expr, [$($field:ident),* $(,)?]) => {
        $(
            for issue in $owner.$field.issues() {
                $out.push(FieldWarning {
                    path: concat!($prefix, stringify!($field)).to_string(),
                    issue: issue.clone(),
                });
            }
        )*
    };
}

impl ExtractedStrategy {
    /// Every field that was coerced while reading this record, in declaration order.
    #[must_use]
    pub fn field_issues(&self) -> Vec<FieldWarning> {
        let mut out = Vec::new();
        collect_issues!(out, "", self, [strategy_name, variation, trader_name, experience_level]);
        collect_issues!(
            out,
            "setup_rules.",
            self.setup_rules,
            [
                underlying,
                option_type,
                strike_selection,
                dte,
                width,
                delta,
                entry_criteria,
                entry_timing,
                buying_power_effect,
            ]
        );
        collect_issues!(
            out,
            "management_rules.",
            self.management_rules,
            [
                profit_target,
                stop_loss,
                time_exit,
                adjustment_rules,
                rolling_rules,
                defensive_maneuvers,
            ]
        );
        collect_issues!(
            out,
            "risk_profile.",
            self.risk_profile,
            [max_loss_per_trade, win_rate, risk_reward_ratio, max_drawdown]
        );
        collect_issues!(
            out,
            "performance_claims.",
            self.performance_claims,
            [
                starting_capital,
                ending_capital,
                total_return_percent,
                time_period,
                profits_withdrawn,
            ]
        );
        out
    }
}
