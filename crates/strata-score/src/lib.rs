//! # strata-score
//!
//! Per-source grading for Strata.
//!
//! - [`SpecificityScorer`]: ten-criterion weighted rubric over an
//!   [`ExtractedStrategy`](strata_core::entities::ExtractedStrategy), 0-10
//! - [`detect_gaps`]: criteria whose sub-score falls below the gap threshold
//! - [`TrustScorer`]: four-factor balance/honesty grade, 0-10
//! - [`QualityScorer`]: composes both and scores batches of sources in parallel
//!
//! Scorers are built once from validated configuration. Scoring itself is
//! pure and infallible: missing or malformed fields lower a grade, they never
//! raise an error.

pub mod error;
pub mod gaps;
pub mod quality;
pub mod specificity;
pub mod trust;

pub use error::ScoreError;
pub use gaps::detect_gaps;
pub use quality::QualityScorer;
pub use specificity::{SpecificityResult, SpecificityScorer, field_band};
pub use trust::TrustScorer;

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
