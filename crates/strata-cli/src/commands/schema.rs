use schemars::{Schema, schema_for};
use strata_core::entities::{
    ConsensusReport, DiscoveryCandidate, ExtractedStrategy, QualityMetrics, Source,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaName};
use crate::output::output;

/// Handle `strata schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.name), flags.format)
}

#[must_use]
pub fn schema(name: SchemaName) -> Schema {
    match name {
        SchemaName::Source => schema_for!(Source),
        SchemaName::ExtractedStrategy => schema_for!(ExtractedStrategy),
        SchemaName::QualityMetrics => schema_for!(QualityMetrics),
        SchemaName::ConsensusReport => schema_for!(ConsensusReport),
        SchemaName::DiscoveryCandidate => schema_for!(DiscoveryCandidate),
    }
}

#[cfg(test)]
mod tests {
    use super::schema;
    use crate::cli::root_commands::SchemaName;

    #[test]
    fn every_schema_is_an_object_schema_with_a_title() {
        for (name, title) in [
            (SchemaName::Source, "Source"),
            (SchemaName::ExtractedStrategy, "ExtractedStrategy"),
            (SchemaName::QualityMetrics, "QualityMetrics"),
            (SchemaName::ConsensusReport, "ConsensusReport"),
            (SchemaName::DiscoveryCandidate, "DiscoveryCandidate"),
        ] {
            let value = serde_json::to_value(schema(name)).expect("schema should serialize");
            assert_eq!(value["title"], title, "{name:?}");
            assert_eq!(value["type"], "object", "{name:?}");
        }
    }
}
