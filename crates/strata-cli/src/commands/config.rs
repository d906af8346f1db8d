use anyhow::Context;
use strata_config::StrataConfig;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `strata config`. Raw output is TOML that can be saved as a config file.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if flags.format == OutputFormat::Raw {
        println!("{}", to_toml(&ctx.config)?);
        return Ok(());
    }
    output(&ctx.config, flags.format)
}

fn to_toml(config: &StrataConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("failed to serialize configuration as TOML")
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use strata_config::StrataConfig;

    use super::to_toml;

    #[test]
    fn toml_output_loads_back_unchanged() {
        Jail::expect_with(|jail| {
            let mut config = StrataConfig::default();
            config.consensus.agreement_threshold = 0.65;
            config.discovery.trusted_channels.push(String::from("Example Channel"));

            let rendered = to_toml(&config).map_err(|e| e.to_string())?;
            jail.create_file("exported.toml", &rendered)?;

            let path = jail.directory().join("exported.toml");
            let loaded = StrataConfig::load_from(Some(&path)).map_err(|e| e.to_string())?;
            assert_eq!(loaded, config);
            Ok(())
        });
    }
}
