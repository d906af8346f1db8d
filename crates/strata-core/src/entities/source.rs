use std::collections::HashSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{ExtractedStrategy, QualityMetrics};
use crate::enums::SourceType;
use crate::errors::CoreError;
use crate::responses::RejectedSource;

/// Engagement numbers reported by the hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlatformMetrics {
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub dislikes: Option<u64>,
    pub upvotes: Option<u64>,
    pub downvotes: Option<u64>,
    pub comments: Option<u64>,
    pub subscribers: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SourceMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub platform_metrics: PlatformMetrics,
}

/// One ingested piece of content and everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    pub id: String,
    pub url: String,
    #[serde(rename = "type", alias = "source_type")]
    pub source_type: SourceType,
    #[serde(default)]
    pub metadata: SourceMetadata,
    #[serde(default)]
    pub extracted_data: ExtractedStrategy,
    /// Derived from `extracted_data`; recomputed by the scorer.
    #[serde(default)]
    pub quality_metrics: QualityMetrics,
}

impl Source {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        source_type: SourceType,
        extracted_data: ExtractedStrategy,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            source_type,
            metadata: SourceMetadata::default(),
            extracted_data,
            quality_metrics: QualityMetrics::default(),
        }
    }
}

/// Sources that passed admission plus the entries that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceBatch {
    pub accepted: Vec<Source>,
    pub rejected: Vec<RejectedSource>,
}

/// Decode a raw batch one element at a time.
///
/// A malformed element, a blank id or a repeated id rejects that element
/// only; the first occurrence of an id is kept. Rejections carry the input
/// index so callers can report them next to the scored sources.
#[must_use]
pub fn admit_sources(values: Vec<Value>) -> SourceBatch {
    let mut batch = SourceBatch::default();
    let mut seen = HashSet::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let raw_id = value
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
            .map(str::to_owned);
        let source = match serde_json::from_value::<Source>(value) {
            Ok(source) => source,
            Err(error) => {
                let error = CoreError::InvalidSource {
                    index,
                    message: error.to_string(),
                };
                batch.rejected.push(RejectedSource::new(index, raw_id, &error));
                continue;
            }
        };

        if source.id.trim().is_empty() {
            let error = CoreError::EmptySourceId { index };
            batch.rejected.push(RejectedSource::new(index, None, &error));
        } else if !seen.insert(source.id.clone()) {
            let error = CoreError::DuplicateSourceId {
                id: source.id.clone(),
            };
            batch.rejected.push(RejectedSource::new(index, Some(source.id), &error));
        } else {
            batch.accepted.push(source);
        }
    }

    batch
}
