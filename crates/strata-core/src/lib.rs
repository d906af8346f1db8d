//! # strata-core
//!
//! Core types and error types for Strata.
//!
//! This crate provides the foundational types shared across all Strata crates:
//! - Confidence-annotated extracted fields with lenient, never-failing decoding
//! - The extracted strategy record and the source entity that owns it
//! - Quality metrics, consensus report and discovery candidate structures
//! - Closed enums for rubric criteria, consensus topics and discovery signals
//! - Response types for batch scoring and tiering

pub mod entities;
pub mod enums;
pub mod errors;
pub mod field;
pub mod responses;
