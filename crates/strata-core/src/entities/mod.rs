//! Entity structs for the Strata data model.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so they can
//! be stored or transported as-is. None of them hold references or cycles.

mod consensus;
mod discovery;
mod metrics;
mod source;
mod strategy;

pub use consensus::{ConsensusItem, ConsensusReport, Controversy, Position};
pub use discovery::{CandidateMetrics, DiscoveryCandidate, parse_iso_duration};
pub use metrics::{QualityMetrics, SpecificityBreakdown};
pub use source::{PlatformMetrics, Source, SourceBatch, SourceMetadata, admit_sources};
pub use strategy::{
    ExtractedStrategy, FailureModeAnalysis, ManagementRules, PerformanceClaims, RiskProfile,
    SetupRules,
};
