//! Explicit conversions between frontmatter values and strings.
//!
//! Frontmatter values are loosely typed. These helpers pin down how a value
//! is rendered as text and when it counts as "present", so the normalizer,
//! merge resolver and exclusion matcher all agree.

use serde_yaml::{Number, Value as YamlValue};

/// Render a value as a plain string.
///
/// Sequences are joined with `,`, mappings are rendered as compact JSON and
/// null becomes `null`.
pub fn stringify(value: &YamlValue) -> String {
    match value {
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => format_yaml_number(n),
        YamlValue::String(s) => s.clone(),
        YamlValue::Sequence(seq) => seq.iter().map(stringify).collect::<Vec<_>>().join(","),
        YamlValue::Mapping(_) => serde_json::to_string(value).unwrap_or_default(),
        YamlValue::Tagged(tagged) => stringify(&tagged.value),
    }
}

/// Format a float the way a user would write it: integral values carry no
/// fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn format_yaml_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        format_number(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Convert a float into a YAML number, preferring the integer form.
pub fn number_to_yaml(n: f64) -> YamlValue {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        YamlValue::Number(Number::from(n as i64))
    } else {
        YamlValue::Number(Number::from(n))
    }
}

/// Whether a value counts as present.
///
/// Null, `false`, zero, NaN and the empty string are absent. Sequences and
/// mappings are present even when empty.
pub fn is_truthy(value: &YamlValue) -> bool {
    match value {
        YamlValue::Null => false,
        YamlValue::Bool(b) => *b,
        YamlValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        YamlValue::String(s) => !s.is_empty(),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => true,
        YamlValue::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Strip the first `#` from a tag, wherever it appears.
pub fn strip_hash(tag: &str) -> String {
    tag.replacen('#', "", 1)
}
