use strata_discovery::curated::match_curated;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CuratedArgs;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata curated`.
pub fn handle(args: &CuratedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let matches = match_curated(&ctx.config.discovery, &args.query);
    if matches.is_empty() {
        tracing::info!(query = %args.query, "no curated source matched");
    }
    output(&apply_limit(matches, flags.limit), flags.format)
}
