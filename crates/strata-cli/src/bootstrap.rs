use std::path::Path;

use anyhow::Context;
use strata_config::StrataConfig;

use crate::cli::GlobalFlags;

/// Resolve `.env`, then load and validate the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<StrataConfig> {
    let explicit = flags.config.as_deref();
    if let Some(path) = explicit
        && !path.is_file()
    {
        anyhow::bail!("invalid --config '{}': file does not exist", path.display());
    }

    load_dotenv(explicit)?;

    StrataConfig::load_from(explicit).with_context(|| match explicit {
        Some(path) => format!("failed to load configuration with {}", path.display()),
        None => String::from("failed to load configuration"),
    })
}

/// Prefer a `.env` beside the explicit config file, then the working directory.
fn load_dotenv(explicit: Option<&Path>) -> anyhow::Result<()> {
    if let Some(dir) = explicit.and_then(Path::parent) {
        let env_path = dir.join(".env");
        if env_path.is_file() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}
