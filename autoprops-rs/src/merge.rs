//! Merge resolution between a new property value and the value already
//! present in a note's frontmatter.

use crate::normalize::NormalizedValue;
use crate::types::{PropertyType, can_be_appended};
use crate::value::is_truthy;
use serde::Serialize;
use serde_yaml::Value as YamlValue;

/// What to do with a property on a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "lowercase")]
pub enum Resolution {
    /// Leave the note untouched.
    Skip,
    /// Replace whatever is there with this value.
    Overwrite(YamlValue),
    /// Replace the existing value with this combined list.
    Merge(Vec<YamlValue>),
}

impl Resolution {
    pub fn action(&self) -> &'static str {
        match self {
            Resolution::Skip => "skip",
            Resolution::Overwrite(_) => "overwrite",
            Resolution::Merge(_) => "merge",
        }
    }
}

/// Decide how `new` combines with `existing`.
///
/// - `force_overwrite`, or no meaningful existing value: overwrite.
/// - Either type not appendable: skip, the existing scalar wins.
/// - A non-empty new value that differs from the existing one: merge into a
///   deduplicated list, existing entries first.
/// - Anything else: skip.
pub fn resolve(
    existing: Option<&YamlValue>,
    new: &NormalizedValue,
    declared_type: PropertyType,
    existing_type: Option<PropertyType>,
    force_overwrite: bool,
) -> Resolution {
    let existing = match existing {
        Some(value) if !force_overwrite && is_truthy(value) => value,
        _ => return Resolution::Overwrite(new.to_yaml()),
    };

    if !can_be_appended(declared_type, existing_type) {
        return Resolution::Skip;
    }

    if new.is_truthy() && !values_equal(existing, new) {
        return Resolution::Merge(merge_into_list(&[existing.clone(), new.to_yaml()]));
    }

    Resolution::Skip
}

/// Compare an existing frontmatter value against a normalized value of the
/// same property, by the normalized value's type.
pub fn values_equal(existing: &YamlValue, new: &NormalizedValue) -> bool {
    match new {
        NormalizedValue::Text(s) | NormalizedValue::Date(s) => existing.as_str() == Some(s.as_str()),
        NormalizedValue::List(items) => existing.as_sequence().is_some_and(|seq| {
            seq.len() == items.len()
                && seq.iter().zip(items).all(|(a, b)| a.as_str() == Some(b.as_str()))
        }),
        NormalizedValue::Number(n) => existing.as_f64() == Some(*n),
        NormalizedValue::Checkbox(b) => existing.as_bool() == Some(*b),
    }
}

/// Flatten values one level into a single list, dropping repeats while
/// keeping the first occurrence of each.
pub fn merge_into_list(values: &[YamlValue]) -> Vec<YamlValue> {
    let mut merged: Vec<YamlValue> = Vec::new();
    let flattened = values.iter().flat_map(|value| match value {
        YamlValue::Sequence(seq) => seq.clone(),
        scalar => vec![scalar.clone()],
    });

    for item in flattened {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}
