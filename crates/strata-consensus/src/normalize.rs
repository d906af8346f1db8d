//! Categorical value normalization.

use strata_config::NormalizationConfig;

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!'];

/// Comparison key for a categorical value. Surrounding whitespace is always
/// trimmed; the rest follows `config`.
#[must_use]
pub fn normalize_text(text: &str, config: &NormalizationConfig) -> String {
    let mut key = if config.collapse_whitespace {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        text.trim().to_string()
    };

    if config.strip_trailing_punctuation {
        let stripped = key.trim_end_matches(TRAILING_PUNCTUATION).trim_end();
        key.truncate(stripped.len());
    }

    if config.case_insensitive {
        key = key.to_lowercase();
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_normalization() {
        let config = NormalizationConfig::default();
        assert_eq!(normalize_text("  SPX ", &config), "spx");
        assert_eq!(normalize_text("50%  of max\tprofit.", &config), "50% of max profit");
        assert_eq!(normalize_text("Roll the  tested side!!", &config), "roll the tested side");
    }

    #[test]
    fn options_can_be_disabled() {
        let config = NormalizationConfig {
            case_insensitive: false,
            collapse_whitespace: false,
            strip_trailing_punctuation: false,
        };
        assert_eq!(normalize_text(" SPX  puts. ", &config), "SPX  puts.");
    }

    #[test]
    fn punctuation_only_value_normalizes_to_empty() {
        assert_eq!(normalize_text("...", &NormalizationConfig::default()), "");
    }
}
