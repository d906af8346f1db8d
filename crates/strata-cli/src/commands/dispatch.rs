use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Score(args) => commands::score::handle(&args, ctx, flags),
        Commands::Synthesize(args) => commands::synthesize::handle(&args, ctx, flags),
        Commands::Tier(args) => commands::tier::handle(&args, ctx, flags),
        Commands::Curated(args) => commands::curated::handle(&args, ctx, flags),
        Commands::Config => commands::config::handle(ctx, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
