//! # strata-consensus
//!
//! Merges many scored sources into one [`ConsensusReport`]: per topic, the
//! values sources state are grouped into buckets of equivalent positions,
//! and the share held by the largest bucket decides between a consensus
//! item and a controversy.
//!
//! - [`normalize`]: categorical value normalization
//! - [`bucket`]: categorical and tolerance-based numeric bucketing
//! - [`Synthesizer`]: topic analysis, tie-breaking and report gaps
//!
//! [`ConsensusReport`]: strata_core::entities::ConsensusReport

pub mod bucket;
pub mod error;
pub mod normalize;
pub mod synthesize;

pub use error::ConsensusError;
pub use synthesize::Synthesizer;
