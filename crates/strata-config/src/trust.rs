//! Trust/bias factor weights.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, check_range, check_weight_sum};

/// Weight of each trust factor. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrustWeights {
    pub discusses_losses: f64,
    pub mentions_drawdown: f64,
    pub shows_losing_trades: f64,
    pub balanced_claims: f64,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            discusses_losses: 0.30,
            mentions_drawdown: 0.25,
            shows_losing_trades: 0.25,
            balanced_claims: 0.20,
        }
    }
}

impl TrustWeights {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for out-of-range or unbalanced weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("trust.discusses_losses", self.discusses_losses),
            ("trust.mentions_drawdown", self.mentions_drawdown),
            ("trust.shows_losing_trades", self.shows_losing_trades),
            ("trust.balanced_claims", self.balanced_claims),
        ];
        for (field, weight) in named {
            check_range(field, weight, 0.0, 1.0)?;
        }
        check_weight_sum("trust", &named.map(|(_, w)| w))
    }
}
