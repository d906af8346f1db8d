//! # strata-discovery
//!
//! Ranks candidate sources before any extraction happens, from platform
//! metrics alone. Scoring is additive and capped at 100; missing metrics
//! contribute nothing and never fail a candidate.

pub mod curated;
pub mod error;
pub mod tier;

pub use error::DiscoveryError;
pub use tier::{RawCandidate, TierScorer, rank};
