use strata_core::entities::ConsensusReport;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::commands::score::score_batch;
use crate::commands::shared::input::read_json_array;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata synthesize`.
pub fn handle(args: &InputArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw: Vec<serde_json::Value> = read_json_array(&args.file)?;
    let report = synthesize_sources(ctx, raw);
    output(&report, flags.format)
}

/// Score first so tie-breaks see fresh specificity scores.
///
/// Rejected elements are logged by the scoring step and left out of the report.
pub fn synthesize_sources(ctx: &AppContext, raw: Vec<serde_json::Value>) -> ConsensusReport {
    let (sources, scored) = score_batch(ctx, raw);
    let warnings = scored.scores.iter().map(|s| s.warnings.len()).sum::<usize>();
    if warnings > 0 {
        tracing::info!(warnings, "some fields were coerced to missing before synthesis");
    }
    ctx.synthesizer.synthesize(&sources)
}
