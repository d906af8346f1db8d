use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{QualitySignal, QualityTier, SourceType};

/// Platform numbers for a candidate that has not been extracted yet.
///
/// Absent numbers are zero; discovery never fails on partial data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CandidateMetrics {
    pub views: u64,
    pub subscribers: u64,
    pub likes: u64,
    pub duration_seconds: Option<u64>,
    /// Explicitly flagged as trusted by the caller.
    pub trusted: bool,
    pub channel_id: Option<String>,
}

impl CandidateMetrics {
    /// Read metrics from a loosely typed platform map.
    ///
    /// Accepts snake_case and camelCase platform keys, numeric strings with
    /// thousands separators, and durations as seconds, minutes or ISO-8601.
    /// Unusable values count as absent.
    #[must_use]
    pub fn from_loose(map: &Map<String, Value>) -> Self {
        let number = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k).and_then(loose_u64));

        let duration_seconds = number(&["duration_seconds", "durationSeconds"])
            .or_else(|| {
                number(&["duration_minutes", "durationMinutes"]).map(|m| m.saturating_mul(60))
            })
            .or_else(|| match map.get("duration") {
                Some(Value::String(s)) => parse_iso_duration(s),
                Some(other) => loose_u64(other),
                None => None,
            });

        let trusted = match map.get("trusted") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        };

        let channel_id = ["channel_id", "channelId"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            views: number(&["views", "view_count", "viewCount"]).unwrap_or(0),
            subscribers: number(&["subscribers", "subscriber_count", "subscriberCount"])
                .unwrap_or(0),
            likes: number(&["likes", "like_count", "likeCount"]).unwrap_or(0),
            duration_seconds,
            trusted,
            channel_id,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn loose_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| *c != ',' && *c != '_')
                .collect();
            cleaned.parse::<u64>().ok().or_else(|| {
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    }
}

/// Parse an ISO-8601 duration such as `PT1H30M45S` into seconds.
#[must_use]
pub fn parse_iso_duration(text: &str) -> Option<u64> {
    let rest = text.trim().strip_prefix("PT")?;
    let mut total = 0u64;
    let mut digits = String::new();
    let mut any = false;
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let n: u64 = digits.parse().ok()?;
        digits.clear();
        let unit = match ch {
            'H' => 3_600,
            'M' => 60,
            'S' => 1,
            _ => return None,
        };
        total = total.checked_add(n.checked_mul(unit)?)?;
        any = true;
    }
    (any && digits.is_empty()).then_some(total)
}

/// A ranked, not-yet-ingested source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiscoveryCandidate {
    pub url: String,
    pub title: String,
    pub author: String,
    pub source_type: Option<SourceType>,
    pub metrics: CandidateMetrics,
    /// Additive rubric score in `[0, 100]`.
    pub quality_score: u8,
    pub quality_tier: QualityTier,
    pub quality_signals: Vec<QualitySignal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loose(value: Value) -> CandidateMetrics {
        CandidateMetrics::from_loose(value.as_object().unwrap())
    }

    #[test]
    fn iso_durations() {
        assert_eq!(parse_iso_duration("PT1H30M45S"), Some(5_445));
        assert_eq!(parse_iso_duration("PT15M30S"), Some(930));
        assert_eq!(parse_iso_duration("PT45S"), Some(45));
        assert_eq!(parse_iso_duration("PT"), None);
        assert_eq!(parse_iso_duration("P1D"), None);
        assert_eq!(parse_iso_duration("PT12"), None);
    }

    #[test]
    fn platform_keys_and_strings() {
        let metrics = loose(json!({
            "viewCount": "150,000",
            "subscriber_count": 200000,
            "likes": 1200.0,
            "duration": "PT20M",
            "channelId": "UC123",
            "trusted": "true"
        }));
        assert_eq!(metrics.views, 150_000);
        assert_eq!(metrics.subscribers, 200_000);
        assert_eq!(metrics.likes, 1_200);
        assert_eq!(metrics.duration_seconds, Some(1_200));
        assert_eq!(metrics.channel_id.as_deref(), Some("UC123"));
        assert!(metrics.trusted);
    }

    #[test]
    fn minutes_and_garbage() {
        let metrics = loose(json!({
            "views": "lots",
            "likes": -5,
            "duration_minutes": 12,
            "channel_id": "  "
        }));
        assert_eq!(metrics.views, 0);
        assert_eq!(metrics.likes, 0);
        assert_eq!(metrics.duration_seconds, Some(720));
        assert_eq!(metrics.channel_id, None);
    }

    #[test]
    fn empty_map_is_all_zero() {
        assert_eq!(loose(json!({})), CandidateMetrics::default());
    }
}
