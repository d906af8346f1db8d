//! Closed enumerations shared by every Strata crate.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Ordered enums (`Criterion`, `Topic`) declare their variants in report order,
//! so `Ord` and the `ALL` tables agree.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

/// How directly an extracted value was stated in the source text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Explicit,
    Implicit,
    Inferred,
    #[default]
    Missing,
}

impl Interpretation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Implicit => "implicit",
            Self::Inferred => "inferred",
            Self::Missing => "missing",
        }
    }

    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValueKind
// ---------------------------------------------------------------------------

/// Shape a field slot expects its value to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free-form categorical text.
    Text,
    /// A single number; ranges are rejected.
    Scalar,
    /// A single number or a `min..=max` range.
    Numeric,
}

impl ValueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Scalar => "scalar",
            Self::Numeric => "numeric",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SourceType
// ---------------------------------------------------------------------------

/// Kind of content a source was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    #[serde(alias = "youtube")]
    Video,
    #[serde(alias = "reddit")]
    ForumPost,
    Article,
}

impl SourceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::ForumPost => "forum_post",
            Self::Article => "article",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// The ten specificity rubric criteria, in rubric order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    StrikeSelection,
    EntryCriteria,
    Dte,
    BuyingPowerEffect,
    ProfitTarget,
    StopLoss,
    Adjustments,
    FailureModes,
    RealPnl,
    BacktestEvidence,
}

impl Criterion {
    /// Every criterion in rubric order.
    pub const ALL: [Self; 10] = [
        Self::StrikeSelection,
        Self::EntryCriteria,
        Self::Dte,
        Self::BuyingPowerEffect,
        Self::ProfitTarget,
        Self::StopLoss,
        Self::Adjustments,
        Self::FailureModes,
        Self::RealPnl,
        Self::BacktestEvidence,
    ];

    /// Stable gap label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrikeSelection => "strike_selection",
            Self::EntryCriteria => "entry_criteria",
            Self::Dte => "dte",
            Self::BuyingPowerEffect => "buying_power_effect",
            Self::ProfitTarget => "profit_target",
            Self::StopLoss => "stop_loss",
            Self::Adjustments => "adjustments",
            Self::FailureModes => "failure_modes",
            Self::RealPnl => "real_pnl",
            Self::BacktestEvidence => "backtest_evidence",
        }
    }

    /// Sentence shown to readers when the criterion is a gap.
    #[must_use]
    pub const fn gap_description(self) -> &'static str {
        match self {
            Self::StrikeSelection => "Strike selection not clearly defined",
            Self::EntryCriteria => "Entry criteria unclear",
            Self::Dte => "DTE not specified",
            Self::BuyingPowerEffect => "Position sizing/BPE not defined",
            Self::ProfitTarget => "Profit target not specified",
            Self::StopLoss => "Stop loss not defined",
            Self::Adjustments => "Adjustment/defense strategy not explained",
            Self::FailureModes => "Failure modes not discussed",
            Self::RealPnl => "No real P&L shown",
            Self::BacktestEvidence => "No backtest or historical data",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// Topics compared across sources during consensus synthesis, in report order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Underlying,
    OptionType,
    StrikeSelection,
    Dte,
    Delta,
    EntryCriteria,
    ProfitTarget,
    StopLoss,
    Adjustments,
    TimeExit,
}

impl Topic {
    pub const ALL: [Self; 10] = [
        Self::Underlying,
        Self::OptionType,
        Self::StrikeSelection,
        Self::Dte,
        Self::Delta,
        Self::EntryCriteria,
        Self::ProfitTarget,
        Self::StopLoss,
        Self::Adjustments,
        Self::TimeExit,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Underlying => "underlying",
            Self::OptionType => "option_type",
            Self::StrikeSelection => "strike_selection",
            Self::Dte => "dte",
            Self::Delta => "delta",
            Self::EntryCriteria => "entry_criteria",
            Self::ProfitTarget => "profit_target",
            Self::StopLoss => "stop_loss",
            Self::Adjustments => "adjustments",
            Self::TimeExit => "time_exit",
        }
    }

    /// Value kind the topic is compared by.
    #[must_use]
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Dte | Self::Delta => ValueKind::Numeric,
            _ => ValueKind::Text,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AgreementStrength
// ---------------------------------------------------------------------------

/// Display tier of a consensus item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStrength {
    Strong,
    Moderate,
}

impl AgreementStrength {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
        }
    }
}

impl fmt::Display for AgreementStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QualityTier
// ---------------------------------------------------------------------------

/// Coarse ranking of a discovery candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    High,
    Medium,
    Low,
}

impl QualityTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QualitySignal
// ---------------------------------------------------------------------------

/// A discovery rule that fired for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QualitySignal {
    HighViews,
    LargeAudience,
    WellLiked,
    TrustedSource,
    IdealDuration,
    CuratedSource,
    KnownEducator,
}

impl QualitySignal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighViews => "high_views",
            Self::LargeAudience => "large_audience",
            Self::WellLiked => "well_liked",
            Self::TrustedSource => "trusted_source",
            Self::IdealDuration => "ideal_duration",
            Self::CuratedSource => "curated_source",
            Self::KnownEducator => "known_educator",
        }
    }
}

impl fmt::Display for QualitySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
