use strata_config::StrataConfig;

/// Variables read by the binary itself rather than by the config loader.
const NON_CONFIG_VARS: &[&str] = &["STRATA_LOG"];

/// Sections a `STRATA_*` variable can address.
const SECTIONS: &[&str] = &["SCORING", "TRUST", "CONSENSUS", "DISCOVERY"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &StrataConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &StrataConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut keys = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("STRATA_") && !NON_CONFIG_VARS.contains(&key.as_str()))
        .collect::<Vec<_>>();
    keys.sort();

    let defaults = StrataConfig::default();
    let mut warnings = Vec::new();
    for key in keys {
        let rest = key.trim_start_matches("STRATA_");
        let Some(section) = SECTIONS.iter().find(|s| rest.starts_with(*s)) else {
            warnings.push(format!(
                "{key} does not name a config section ({}); it is ignored.",
                SECTIONS.join(", ")
            ));
            continue;
        };

        if !rest.trim_start_matches(section).starts_with("__") {
            let section_default = match *section {
                "SCORING" => config.scoring == defaults.scoring,
                "TRUST" => config.trust == defaults.trust,
                "CONSENSUS" => config.consensus == defaults.consensus,
                _ => config.discovery == defaults.discovery,
            };
            let state = if section_default {
                "the section is still at its defaults"
            } else {
                "it was not applied"
            };
            warnings.push(format!(
                "{key} is missing the double underscore after {section}; {state}. Example: STRATA_CONSENSUS__AGREEMENT_THRESHOLD."
            ));
        }
    }
    warnings
}
