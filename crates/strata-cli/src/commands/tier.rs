use strata_core::entities::DiscoveryCandidate;
use strata_discovery::RawCandidate;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::commands::shared::input::read_json_array;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata tier`.
pub fn handle(args: &InputArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raws: Vec<RawCandidate> = read_json_array(&args.file)?;
    output(&tier_candidates(ctx, raws, flags.limit), flags.format)
}

/// Tier, rank and truncate.
pub fn tier_candidates(
    ctx: &AppContext,
    raws: Vec<RawCandidate>,
    limit: Option<u32>,
) -> Vec<DiscoveryCandidate> {
    apply_limit(ctx.tiers.assess_all(raws), limit)
}
