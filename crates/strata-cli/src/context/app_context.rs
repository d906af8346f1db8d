use anyhow::Context;
use strata_config::StrataConfig;
use strata_consensus::Synthesizer;
use strata_discovery::TierScorer;
use strata_score::QualityScorer;

/// Scorers built once from the validated configuration.
pub struct AppContext {
    pub config: StrataConfig,
    pub scorer: QualityScorer,
    pub synthesizer: Synthesizer,
    pub tiers: TierScorer,
}

impl AppContext {
    pub fn init(config: StrataConfig) -> anyhow::Result<Self> {
        let scorer =
            QualityScorer::from_config(&config).context("failed to build quality scorer")?;
        let synthesizer = Synthesizer::new(config.consensus.clone())
            .context("failed to build consensus synthesizer")?;
        let tiers =
            TierScorer::new(config.discovery.clone()).context("failed to build tier scorer")?;

        Ok(Self {
            config,
            scorer,
            synthesizer,
            tiers,
        })
    }
}
