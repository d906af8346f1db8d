//! Response types returned by the scorers and emitted as JSON by `strata`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::QualityMetrics;
use crate::enums::{QualitySignal, QualityTier};
use crate::errors::CoreError;
use crate::field::FieldWarning;

/// Per-source outcome of a scoring batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SourceScore {
    pub source_id: String,
    pub metrics: QualityMetrics,
    /// Fields that were coerced to missing or clamped while reading the source.
    pub warnings: Vec<FieldWarning>,
}

/// A batch element that was left out of scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RejectedSource {
    /// Position of the element in the input array.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub reason: String,
}

impl RejectedSource {
    #[must_use]
    pub fn new(index: usize, source_id: Option<String>, error: &CoreError) -> Self {
        Self {
            index,
            source_id,
            reason: error.to_string(),
        }
    }
}

/// Output of `strata score`: graded sources plus the ones that were rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreReport {
    pub scores: Vec<SourceScore>,
    pub rejected: Vec<RejectedSource>,
}

/// Result of tiering one discovery candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TierAssessment {
    pub score: u8,
    pub tier: QualityTier,
    pub signals: Vec<QualitySignal>,
}

/// Factor values behind a trust score, each either 0 or 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrustBreakdown {
    pub discusses_losses: f64,
    pub mentions_drawdown: f64,
    pub shows_losing_trades: f64,
    pub balanced_claims: f64,
}

/// Trust grade with the factors that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrustAssessment {
    /// Weighted grade in `[0, 10]`, rounded to one decimal.
    pub score: f64,
    pub breakdown: TrustBreakdown,
}
