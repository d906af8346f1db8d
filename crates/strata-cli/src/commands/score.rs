use strata_core::entities::{Source, admit_sources};
use strata_core::responses::{RejectedSource, ScoreReport, SourceScore};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::root_commands::InputArgs;
use crate::commands::shared::input::read_json_array;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata score`.
pub fn handle(args: &InputArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw: Vec<serde_json::Value> = read_json_array(&args.file)?;
    let (_, mut report) = score_batch(ctx, raw);
    report.scores = apply_limit(report.scores, flags.limit);

    if flags.format == OutputFormat::Table {
        output(&report.scores, flags.format)?;
        if !report.rejected.is_empty() {
            output(&report.rejected, flags.format)?;
        }
        return Ok(());
    }
    output(&report, flags.format)
}

/// Admit each element on its own, then grade the accepted sources in input order.
///
/// Returns the scored sources alongside the report so synthesis can reuse them.
pub fn score_batch(ctx: &AppContext, raw: Vec<serde_json::Value>) -> (Vec<Source>, ScoreReport) {
    let batch = admit_sources(raw);
    log_rejections(&batch.rejected);

    let mut sources = batch.accepted;
    let scores: Vec<SourceScore> = ctx.scorer.score_batch(&mut sources);
    (
        sources,
        ScoreReport {
            scores,
            rejected: batch.rejected,
        },
    )
}

fn log_rejections(rejected: &[RejectedSource]) {
    for entry in rejected {
        tracing::warn!(
            index = entry.index,
            source_id = entry.source_id.as_deref().unwrap_or(""),
            reason = %entry.reason,
            "source rejected"
        );
    }
}
