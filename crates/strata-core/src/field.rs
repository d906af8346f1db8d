//! Confidence-annotated extracted fields.
//!
//! `ExtractedField<V>` is the atomic unit every scorer reads. `V` is one of
//! three value kinds:
//!
//! | kind            | Rust type       | accepts                                   |
//! |-----------------|-----------------|-------------------------------------------|
//! | categorical     | `String`        | strings, numbers and booleans as text     |
//! | scalar          | `f64`           | numbers, numeric strings (`"$3,200"`)     |
//! | numeric         | `NumericValue`  | scalars and ranges (`"30-45"`, `[30, 45]`)|
//!
//! Deserialization never fails on a field's contents. A value with the wrong
//! shape for its slot is coerced to `missing` with confidence 0 and the
//! problem is kept in [`ExtractedField::issues`] so callers can surface it as
//! a warning. After construction the invariant `interpretation == Missing`
//! iff `value.is_none()` always holds, and a missing field has confidence 0.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::{Interpretation, ValueKind};

// ---------------------------------------------------------------------------
// Numeric values
// ---------------------------------------------------------------------------

/// Closed numeric interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }
}

/// A scalar or a range, e.g. `35` DTE or `30-45` DTE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumericValue {
    Scalar(f64),
    Range(NumericRange),
}

impl NumericValue {
    /// Lower and upper bound; a scalar is a degenerate interval.
    #[must_use]
    pub const fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Scalar(v) => (*v, *v),
            Self::Range(r) => (r.min, r.max),
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Range(r) if (r.min - r.max).abs() < f64::EPSILON => write!(f, "{}", r.min),
            Self::Range(r) => write!(f, "{}-{}", r.min, r.max),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// A value type an [`ExtractedField`] can carry.
pub trait FieldKind: Sized {
    /// Shape this kind expects.
    const KIND: ValueKind;

    /// Read a value from its loose JSON form. `None` means wrong shape.
    fn from_json(value: &Value) -> Option<Self>;

    /// Read a value from a separate `value_range` pair.
    fn from_range(_range: NumericRange) -> Option<Self> {
        None
    }
}

impl FieldKind for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl FieldKind for f64 {
    const KIND: ValueKind = ValueKind::Scalar;

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => match parse_numeric_text(s)? {
                NumericValue::Scalar(v) => Some(v),
                NumericValue::Range(_) => None,
            },
            _ => None,
        }
    }
}

impl FieldKind for NumericValue {
    const KIND: ValueKind = ValueKind::Numeric;

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::Scalar),
            Value::String(s) => parse_numeric_text(s),
            Value::Array(items) => match items.as_slice() {
                [a, b] => Some(Self::Range(NumericRange::new(a.as_f64()?, b.as_f64()?))),
                [a] => a.as_f64().map(Self::Scalar),
                _ => None,
            },
            Value::Object(map) => {
                let lo = map.get("min").or_else(|| map.get("low"))?.as_f64()?;
                let hi = map.get("max").or_else(|| map.get("high"))?.as_f64()?;
                Some(Self::Range(NumericRange::new(lo, hi)))
            }
            _ => None,
        }
    }

    fn from_range(range: NumericRange) -> Option<Self> {
        Some(Self::Range(range))
    }
}

/// Parse free text such as `"30-45"`, `"30 to 45 DTE"`, `"0.16"` or `"$3,200"`.
///
/// One number yields a scalar; two numbers joined by a dash (or "to") yield a
/// range. Anything else is not numeric.
#[must_use]
pub fn parse_numeric_text(text: &str) -> Option<NumericValue> {
    let normalized = text.replace(['\u{2013}', '\u{2014}'], "-").replace(" to ", "-");

    let mut numbers: Vec<f64> = Vec::new();
    let mut current = String::new();
    let mut after_number = false;
    let mut separated = false;

    let flush = |current: &mut String, numbers: &mut Vec<f64>, after: &mut bool| {
        if !current.is_empty() {
            if let Ok(n) = current.parse::<f64>() {
                numbers.push(n);
                *after = true;
            }
            current.clear();
        }
    };

    let mut chars = normalized.chars().peekable();
    while let Some(ch) = chars.next() {
        let next_is_digit = chars.peek().is_some_and(char::is_ascii_digit);
        if ch.is_ascii_digit() || (ch == '.' && next_is_digit) {
            current.push(ch);
        } else if ch == ',' && !current.is_empty() && next_is_digit {
            // thousands separator
        } else if ch == '-' && current.is_empty() && !after_number && next_is_digit {
            current.push('-');
        } else {
            flush(&mut current, &mut numbers, &mut after_number);
            if ch == '-' && after_number {
                after_number = false;
                separated = true;
            }
        }
    }
    flush(&mut current, &mut numbers, &mut after_number);

    match numbers.as_slice() {
        [v] => Some(NumericValue::Scalar(*v)),
        [a, b] if separated => Some(NumericValue::Range(NumericRange::new(*a, *b))),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Field issues
// ---------------------------------------------------------------------------

/// A non-fatal problem found while reading a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldIssue {
    /// The value did not fit the slot's kind and was dropped.
    WrongShape { expected: ValueKind },
    /// The field itself was not a JSON object.
    NotAnObject,
    /// Confidence was outside `[0, 1]` and was clamped.
    ConfidenceClamped { original: f64 },
    /// The interpretation label was not recognized.
    UnknownInterpretation { given: String },
    /// A value was supplied but labeled `missing`; the value was dropped.
    ValueMarkedMissing,
    /// A non-missing interpretation came without a value.
    InterpretationWithoutValue,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongShape { expected } => write!(f, "value is not a valid {expected}"),
            Self::NotAnObject => f.write_str("field is not an object"),
            Self::ConfidenceClamped { original } => {
                write!(f, "confidence {original} clamped into [0, 1]")
            }
            Self::UnknownInterpretation { given } => {
                write!(f, "unknown interpretation '{given}'")
            }
            Self::ValueMarkedMissing => f.write_str("value labeled missing was dropped"),
            Self::InterpretationWithoutValue => f.write_str("interpretation given without a value"),
        }
    }
}

/// A field issue located inside a strategy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldWarning {
    /// Dotted path, e.g. `setup_rules.dte`.
    pub path: String,
    pub issue: FieldIssue,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.issue)
    }
}

// ---------------------------------------------------------------------------
// ExtractedField
// ---------------------------------------------------------------------------

/// A single extracted value with its confidence and provenance.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ExtractedField<V> {
    pub value: Option<V>,
    /// Extractor confidence in `[0, 1]`.
    pub confidence: f64,
    pub source_quote: Option<String>,
    pub interpretation: Interpretation,
    #[serde(skip)]
    issues: Vec<FieldIssue>,
}

/// Categorical text field.
pub type TextField = ExtractedField<String>;
/// Scalar-only numeric field.
pub type ScalarField = ExtractedField<f64>;
/// Scalar-or-range numeric field.
pub type NumericField = ExtractedField<NumericValue>;

impl<V> Default for ExtractedField<V> {
    fn default() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            source_quote: None,
            interpretation: Interpretation::Missing,
            issues: Vec::new(),
        }
    }
}

impl<V> ExtractedField<V> {
    /// A field the extractor did not find.
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }

    /// Build a field, enforcing the missing/value invariant and clamping confidence.
    #[must_use]
    pub fn new(value: V, confidence: f64, interpretation: Interpretation) -> Self {
        if interpretation.is_missing() {
            return Self::missing();
        }
        Self {
            value: Some(value),
            confidence: clamp_confidence(confidence),
            source_quote: None,
            interpretation,
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub fn explicit(value: V, confidence: f64) -> Self {
        Self::new(value, confidence, Interpretation::Explicit)
    }

    #[must_use]
    pub fn implicit(value: V, confidence: f64) -> Self {
        Self::new(value, confidence, Interpretation::Implicit)
    }

    #[must_use]
    pub fn inferred(value: V, confidence: f64) -> Self {
        Self::new(value, confidence, Interpretation::Inferred)
    }

    #[must_use]
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.source_quote = Some(quote.into());
        self
    }

    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// True when the field carries a usable value.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Problems found while reading this field.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

impl<V: FieldKind> ExtractedField<V> {
    /// Read a field from its loose wire form, coercing bad shapes to `missing`.
    #[must_use]
    pub fn from_wire(raw: &Value) -> Self {
        let map = match raw {
            Value::Null => return Self::missing(),
            Value::Object(map) => map,
            _ => {
                let mut field = Self::missing();
                field.issues.push(FieldIssue::NotAnObject);
                return field;
            }
        };

        let mut issues = Vec::new();

        let raw_value = map.get("value").filter(|v| !v.is_null());
        let mut value = match raw_value {
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => {
                let parsed = V::from_json(v);
                if parsed.is_none() {
                    issues.push(FieldIssue::WrongShape { expected: V::KIND });
                }
                parsed
            }
            None => None,
        };

        if value.is_none() && raw_value.is_none() {
            if let Some(range) = map.get("value_range").filter(|v| !v.is_null()) {
                value = range_pair(range).and_then(V::from_range);
                if value.is_none() {
                    issues.push(FieldIssue::WrongShape { expected: V::KIND });
                }
            }
        }

        let interpretation = match map.get("interpretation") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "explicit" => Some(Interpretation::Explicit),
                "implicit" => Some(Interpretation::Implicit),
                "inferred" => Some(Interpretation::Inferred),
                "missing" => Some(Interpretation::Missing),
                other => {
                    issues.push(FieldIssue::UnknownInterpretation {
                        given: other.to_string(),
                    });
                    None
                }
            },
            Some(other) => {
                issues.push(FieldIssue::UnknownInterpretation {
                    given: other.to_string(),
                });
                None
            }
        };

        let confidence = match map.get("confidence") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        let clamped = clamp_confidence(confidence);
        if (clamped - confidence).abs() > f64::EPSILON {
            issues.push(FieldIssue::ConfidenceClamped {
                original: confidence,
            });
        }

        let source_quote = map
            .get("source_quote")
            .and_then(Value::as_str)
            .map(str::to_string);

        let interpretation = match (value.is_some(), interpretation) {
            (true, Some(Interpretation::Missing)) => {
                issues.push(FieldIssue::ValueMarkedMissing);
                value = None;
                Interpretation::Missing
            }
            (true, Some(interp)) => interp,
            // A value with no label is trusted least.
            (true, None) => Interpretation::Inferred,
            (false, Some(interp)) if !interp.is_missing() => {
                if raw_value.is_none() {
                    issues.push(FieldIssue::InterpretationWithoutValue);
                }
                Interpretation::Missing
            }
            (false, _) => Interpretation::Missing,
        };

        let confidence = if interpretation.is_missing() {
            0.0
        } else {
            clamped
        };

        Self {
            value,
            confidence,
            source_quote,
            interpretation,
            issues,
        }
    }
}

fn range_pair(raw: &Value) -> Option<NumericRange> {
    match raw {
        Value::Array(items) => match items.as_slice() {
            [a, b] => Some(NumericRange::new(a.as_f64()?, b.as_f64()?)),
            _ => None,
        },
        _ => None,
    }
}

impl<'de, V: FieldKind> Deserialize<'de> for ExtractedField<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_scalars_and_ranges() {
        assert_eq!(parse_numeric_text("35"), Some(NumericValue::Scalar(35.0)));
        assert_eq!(
            parse_numeric_text("30-45"),
            Some(NumericValue::Range(NumericRange::new(30.0, 45.0)))
        );
        assert_eq!(
            parse_numeric_text("30 \u{2013} 45 DTE"),
            Some(NumericValue::Range(NumericRange::new(30.0, 45.0)))
        );
        assert_eq!(
            parse_numeric_text("30 to 45"),
            Some(NumericValue::Range(NumericRange::new(30.0, 45.0)))
        );
        assert_eq!(parse_numeric_text("0.16 delta"), Some(NumericValue::Scalar(0.16)));
        assert_eq!(parse_numeric_text("$3,200"), Some(NumericValue::Scalar(3200.0)));
        assert_eq!(parse_numeric_text("-12%"), Some(NumericValue::Scalar(-12.0)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_eq!(parse_numeric_text("about a month"), None);
        assert_eq!(parse_numeric_text("2 weeks or 45 days"), None);
        assert_eq!(parse_numeric_text("1-2-3"), None);
    }

    #[test]
    fn numeric_display_matches_input_form() {
        assert_eq!(parse_numeric_text("30-45").unwrap().to_string(), "30-45");
        assert_eq!(NumericValue::Scalar(35.0).to_string(), "35");
        assert_eq!(NumericValue::Scalar(0.16).to_string(), "0.16");
    }

    #[test]
    fn explicit_field_from_wire() {
        let field: NumericField = serde_json::from_value(json!({
            "value": "30-45",
            "confidence": 0.9,
            "source_quote": "I open these 30 to 45 days out",
            "interpretation": "explicit"
        }))
        .unwrap();

        assert_eq!(field.interpretation, Interpretation::Explicit);
        assert_eq!(field.value, Some(NumericValue::Range(NumericRange::new(30.0, 45.0))));
        assert!(field.issues().is_empty());
    }

    #[test]
    fn range_in_scalar_slot_becomes_missing() {
        let field: ScalarField = serde_json::from_value(json!({
            "value": [10, 20],
            "confidence": 0.8,
            "interpretation": "explicit"
        }))
        .unwrap();

        assert_eq!(field.value, None);
        assert_eq!(field.interpretation, Interpretation::Missing);
        assert!(field.confidence.abs() < f64::EPSILON);
        assert_eq!(
            field.issues(),
            &[FieldIssue::WrongShape {
                expected: ValueKind::Scalar
            }]
        );
    }

    #[test]
    fn value_range_key_is_accepted_for_numeric_slots() {
        let field: NumericField = serde_json::from_value(json!({
            "value_range": [45, 30],
            "confidence": 0.7,
            "interpretation": "implicit"
        }))
        .unwrap();
        assert_eq!(field.value, Some(NumericValue::Range(NumericRange::new(30.0, 45.0))));
    }

    #[test]
    fn missing_label_wins_over_value() {
        let field: TextField = serde_json::from_value(json!({
            "value": "SPX",
            "confidence": 0.4,
            "interpretation": "missing"
        }))
        .unwrap();
        assert!(!field.is_present());
        assert!(field.confidence.abs() < f64::EPSILON);
        assert_eq!(field.issues(), &[FieldIssue::ValueMarkedMissing]);
    }

    #[test]
    fn confidence_is_clamped() {
        let field: TextField = serde_json::from_value(json!({
            "value": "SPX",
            "confidence": 1.7,
            "interpretation": "explicit"
        }))
        .unwrap();
        assert!((field.confidence - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            field.issues(),
            &[FieldIssue::ConfidenceClamped { original: 1.7 }]
        );
    }

    #[test]
    fn unlabeled_value_is_inferred() {
        let field: TextField =
            serde_json::from_value(json!({ "value": "SPX", "confidence": 0.5 })).unwrap();
        assert_eq!(field.interpretation, Interpretation::Inferred);
    }

    #[test]
    fn null_and_bare_values() {
        let null: TextField = serde_json::from_value(Value::Null).unwrap();
        assert_eq!(null, TextField::missing());

        let bare: TextField = serde_json::from_value(json!("SPX")).unwrap();
        assert!(!bare.is_present());
        assert_eq!(bare.issues(), &[FieldIssue::NotAnObject]);
    }

    #[test]
    fn constructor_enforces_invariant() {
        let field = TextField::new("SPX".into(), 0.9, Interpretation::Missing);
        assert_eq!(field, TextField::missing());

        let clamped = TextField::explicit("SPX".into(), -3.0);
        assert!(clamped.confidence.abs() < f64::EPSILON);
    }
}
