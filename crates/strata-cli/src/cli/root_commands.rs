use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Grade a batch of extracted sources.
    Score(InputArgs),
    /// Grade a batch of sources, then report consensus, controversies and gaps.
    Synthesize(InputArgs),
    /// Rank raw discovery candidates by platform metrics.
    Tier(InputArgs),
    /// Match a query against the curated educational sources.
    Curated(CuratedArgs),
    /// Print the effective configuration.
    Config,
    /// Print the JSON Schema of an input or output document.
    Schema(SchemaArgs),
}

/// A JSON array read from a file, or stdin when the path is `-`.
#[derive(Clone, Debug, Args)]
pub struct InputArgs {
    /// Path to a JSON file holding an array
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct CuratedArgs {
    /// Free-text topic query, e.g. "iron condor"
    pub query: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Document to describe
    #[arg(value_enum)]
    pub name: SchemaName,
}

/// Documents with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaName {
    Source,
    #[value(alias = "extracted_strategy")]
    ExtractedStrategy,
    #[value(alias = "quality_metrics")]
    QualityMetrics,
    #[value(alias = "consensus_report")]
    ConsensusReport,
    #[value(alias = "discovery_candidate")]
    DiscoveryCandidate,
}
