//! Cross-cutting error types for Strata.
//!
//! Scoring and synthesis never fail on partial domain data, so the errors
//! here cover per-source batch admission problems only. Configuration errors live in
//! `strata-config`; the CLI converges everything into `anyhow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A source in a batch has a blank id.
    #[error("Source at index {index} has an empty id")]
    EmptySourceId { index: usize },

    /// Two sources in a batch share an id, which breaks attribution.
    #[error("Duplicate source id: {id}")]
    DuplicateSourceId { id: String },

    /// A batch element does not decode as a source.
    #[error("Source at index {index} is malformed: {message}")]
    InvalidSource { index: usize, message: String },
}
