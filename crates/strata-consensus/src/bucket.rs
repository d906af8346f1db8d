//! Grouping of per-source topic values into positions.
//!
//! Buckets are built in first-seen order. Each bucket keeps the first
//! member's value as its representative, and later values are compared
//! against that representative only, so membership never chains through
//! intermediate values.

use strata_config::NormalizationConfig;
use strata_core::field::NumericValue;

use crate::normalize::normalize_text;

/// A value one source stated for a topic.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicValue {
    Text(String),
    Numeric(NumericValue),
}

impl TopicValue {
    /// Form shown in reports.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Numeric(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum BucketKey {
    Text(String),
    Interval(f64, f64),
}

/// Equivalent values from one or more sources.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    key: BucketKey,
    /// Display form of the first member.
    pub representative: String,
    /// Indices into the caller's source list, in input order.
    pub members: Vec<usize>,
}

impl Bucket {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Bucketing rules for one synthesis run.
#[derive(Debug, Clone, Copy)]
pub struct Bucketer {
    normalization: NormalizationConfig,
    tolerance: f64,
}

impl Bucketer {
    #[must_use]
    pub const fn new(normalization: NormalizationConfig, tolerance: f64) -> Self {
        Self {
            normalization,
            tolerance,
        }
    }

    /// Group `(source index, value)` pairs. Values that normalize to nothing
    /// are dropped. Buckets come back in first-seen order.
    #[must_use]
    pub fn bucket(&self, values: &[(usize, TopicValue)]) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = Vec::new();

        for (index, value) in values {
            let Some(key) = self.key_for(value) else {
                continue;
            };

            let slot = match &key {
                BucketKey::Text(_) => buckets.iter().position(|b| b.key == key),
                BucketKey::Interval(lo, hi) => buckets
                    .iter()
                    .position(|b| b.key == key)
                    .or_else(|| {
                        buckets.iter().position(|b| match b.key {
                            BucketKey::Interval(blo, bhi) => {
                                self.overlaps((*lo, *hi), (blo, bhi))
                            }
                            BucketKey::Text(_) => false,
                        })
                    }),
            };

            match slot {
                Some(i) => buckets[i].members.push(*index),
                None => buckets.push(Bucket {
                    key,
                    representative: value.display(),
                    members: vec![*index],
                }),
            }
        }
        buckets
    }

    /// Whether `value` survives normalization and would join some bucket.
    #[must_use]
    pub fn accepts(&self, value: &TopicValue) -> bool {
        self.key_for(value).is_some()
    }

    fn key_for(&self, value: &TopicValue) -> Option<BucketKey> {
        match value {
            TopicValue::Text(text) => {
                let key = normalize_text(text, &self.normalization);
                (!key.is_empty()).then_some(BucketKey::Text(key))
            }
            TopicValue::Numeric(number) => {
                let (lo, hi) = number.bounds();
                (lo.is_finite() && hi.is_finite()).then_some(BucketKey::Interval(lo, hi))
            }
        }
    }

    /// Overlap after widening each interval by `tolerance` times its largest
    /// absolute bound.
    fn overlaps(&self, a: (f64, f64), b: (f64, f64)) -> bool {
        let pad = |(lo, hi): (f64, f64)| self.tolerance * lo.abs().max(hi.abs());
        let slack = pad(a) + pad(b);
        a.0 - slack <= b.1 && b.0 - slack <= a.1
    }
}
