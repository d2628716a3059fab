//! Property value normalization.
//!
//! Converts a raw, loosely typed value (typed into a settings form, or
//! already stored in frontmatter) into the canonical representation for a
//! declared [`PropertyType`]. Normalization is total: malformed input falls
//! back to the type's default instead of failing.

use crate::sanitize::sanitize_tag;
use crate::types::PropertyType;
use crate::value::{is_truthy, number_to_yaml, stringify};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_yaml::Value as YamlValue;

/// Canonical value for a declared property type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    /// `text`
    Text(String),
    /// `multitext`, `tags` and `aliases`
    List(Vec<String>),
    /// `number`
    Number(f64),
    /// `checkbox`
    Checkbox(bool),
    /// `date` and `datetime`, as `YYYY-MM-DD` or empty
    Date(String),
}

impl NormalizedValue {
    /// Convert into a frontmatter value.
    pub fn to_yaml(&self) -> YamlValue {
        match self {
            NormalizedValue::Text(s) | NormalizedValue::Date(s) => YamlValue::String(s.clone()),
            NormalizedValue::List(items) => YamlValue::Sequence(
                items.iter().cloned().map(YamlValue::String).collect(),
            ),
            NormalizedValue::Number(n) => number_to_yaml(*n),
            NormalizedValue::Checkbox(b) => YamlValue::Bool(*b),
        }
    }

    /// Whether the value carries anything worth writing.
    pub fn is_truthy(&self) -> bool {
        match self {
            NormalizedValue::Text(s) | NormalizedValue::Date(s) => !s.is_empty(),
            NormalizedValue::List(items) => !items.is_empty(),
            NormalizedValue::Number(n) => *n != 0.0,
            NormalizedValue::Checkbox(b) => *b,
        }
    }
}

/// Default value used when no raw value is given.
pub fn default_value(property_type: PropertyType) -> NormalizedValue {
    match property_type {
        PropertyType::Text => NormalizedValue::Text(String::new()),
        PropertyType::Multitext | PropertyType::Tags | PropertyType::Aliases => {
            NormalizedValue::List(Vec::new())
        }
        PropertyType::Number => NormalizedValue::Number(0.0),
        PropertyType::Checkbox => NormalizedValue::Checkbox(false),
        PropertyType::Date | PropertyType::Datetime => NormalizedValue::Date(String::new()),
    }
}

/// Normalize `raw` for `property_type`, resolving `today`/`now` against the
/// current UTC date.
pub fn normalize(raw: Option<&YamlValue>, property_type: PropertyType) -> NormalizedValue {
    normalize_at(raw, property_type, Utc::now().date_naive())
}

/// Normalize `raw` for `property_type` with an explicit current date.
pub fn normalize_at(
    raw: Option<&YamlValue>,
    property_type: PropertyType,
    today: NaiveDate,
) -> NormalizedValue {
    let raw = match raw {
        None | Some(YamlValue::Null) => return default_value(property_type),
        Some(YamlValue::Tagged(tagged)) => return normalize_at(Some(&tagged.value), property_type, today),
        Some(value) => value,
    };

    match property_type {
        PropertyType::Text => NormalizedValue::Text(stringify(raw)),
        PropertyType::Multitext | PropertyType::Aliases => NormalizedValue::List(split_list(raw)),
        PropertyType::Tags => NormalizedValue::List(
            split_list(raw)
                .iter()
                .map(|piece| sanitize_tag(piece))
                .filter(|tag| !tag.is_empty())
                .collect(),
        ),
        PropertyType::Number => NormalizedValue::Number(coerce_number(raw)),
        PropertyType::Checkbox => NormalizedValue::Checkbox(coerce_bool(raw)),
        // Time of day is dropped for `datetime` too.
        PropertyType::Date | PropertyType::Datetime => {
            if !is_truthy(raw) {
                return NormalizedValue::Date(String::new());
            }
            let text = stringify(raw);
            let text = text.trim();
            if text == "today" || text == "now" {
                NormalizedValue::Date(today.format("%Y-%m-%d").to_string())
            } else {
                NormalizedValue::Date(text.to_string())
            }
        }
    }
}

/// Split a value into trimmed, non-empty pieces.
///
/// Sequences contribute one piece per element; scalars are split on `,`.
fn split_list(raw: &YamlValue) -> Vec<String> {
    let pieces: Vec<String> = match raw {
        YamlValue::Sequence(seq) => seq.iter().map(stringify).collect(),
        other => stringify(other).split(',').map(str::to_string).collect(),
    };

    pieces
        .into_iter()
        .map(|piece| piece.trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

fn coerce_number(raw: &YamlValue) -> f64 {
    let n = match raw {
        YamlValue::Number(n) => n.as_f64().unwrap_or(0.0),
        YamlValue::Bool(true) => 1.0,
        YamlValue::Bool(false) => 0.0,
        other => parse_number(&stringify(other)).unwrap_or(0.0),
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Parse a numeric string. Blank strings are zero; `0x`, `0o` and `0b`
/// prefixes are accepted.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return i64::from_str_radix(&text[2..], radix).ok().map(|i| i as f64);
    }

    // Rust also accepts "inf"/"nan" spellings; the finiteness check in the
    // caller folds those back to zero.
    text.parse::<f64>().ok()
}

fn coerce_bool(raw: &YamlValue) -> bool {
    match raw {
        YamlValue::Bool(b) => *b,
        YamlValue::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        other => is_truthy(other),
    }
}
