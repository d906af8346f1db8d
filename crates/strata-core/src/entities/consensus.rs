use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AgreementStrength, Topic};

/// One bucket of equivalent values for a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    /// Representative value, as the first source in the bucket stated it.
    pub value: String,
    pub source_count: usize,
    pub sources: Vec<String>,
}

/// A topic where enough sources agree on one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConsensusItem {
    pub topic: Topic,
    pub consensus_value: String,
    /// Share of sources with a value for the topic that sit in the winning bucket.
    pub agreement_rate: f64,
    pub strength: AgreementStrength,
    /// Dissenting buckets, largest first.
    pub positions: Vec<Position>,
    /// Sources in the winning bucket.
    pub sources: Vec<String>,
}

/// A topic split across at least two buckets with no majority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Controversy {
    pub topic: Topic,
    pub agreement_rate: f64,
    /// Every bucket, largest first; equal sizes keep first-seen order.
    pub positions: Vec<Position>,
    /// Every source that stated a value for the topic.
    pub sources: Vec<String>,
}

/// Cross-source synthesis for one batch of sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConsensusReport {
    pub sources_analyzed: usize,
    pub consensus: Vec<ConsensusItem>,
    pub controversies: Vec<Controversy>,
    /// Topic and coverage labels most sources leave unaddressed.
    pub gaps: Vec<String>,
}
