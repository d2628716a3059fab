//! Applying configured properties to notes.
//!
//! This is the orchestration layer around the engine: it walks the
//! enabled property definitions in order, normalizes each value, resolves
//! it against what the note already has and writes the result into a
//! working copy of the frontmatter. Later definitions see the writes of
//! earlier ones.

use crate::config::Settings;
use crate::error::Result;
use crate::exclusion::ExclusionReason;
use crate::merge::{Resolution, resolve};
use crate::normalize::normalize_at;
use crate::note::Note;
use crate::types::{PropertyDefinition, PropertyType};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_yaml::{Mapping, Value as YamlValue};

/// How a property was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Overwrite,
    Merge,
}

/// A property written to a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyChange {
    pub name: String,
    pub action: ChangeKind,
    pub value: YamlValue,
}

/// Result of applying settings to one note.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The master switch is off.
    Disabled,
    /// An exclusion rule matched.
    Excluded(ExclusionReason),
    /// No enabled property definitions.
    NoProperties,
    /// Properties were evaluated; `note` holds the updated content.
    Applied { changes: Vec<PropertyChange>, note: Note },
}

/// Apply `definitions` to `frontmatter` in place, resolving `today`/`now`
/// against the current UTC date.
pub fn apply_properties<F>(
    definitions: &[PropertyDefinition],
    frontmatter: &mut Mapping,
    type_hint: F,
) -> Vec<PropertyChange>
where
    F: Fn(&str) -> Option<PropertyType>,
{
    apply_properties_at(definitions, frontmatter, type_hint, Utc::now().date_naive())
}

/// Apply `definitions` to `frontmatter` in place with an explicit current
/// date. Disabled and unnamed definitions are skipped.
pub fn apply_properties_at<F>(
    definitions: &[PropertyDefinition],
    frontmatter: &mut Mapping,
    type_hint: F,
    today: NaiveDate,
) -> Vec<PropertyChange>
where
    F: Fn(&str) -> Option<PropertyType>,
{
    let mut changes = Vec::new();

    for definition in definitions.iter().filter(|d| d.enabled) {
        let Some(key) = definition.key() else {
            tracing::debug!("skipping property with empty name");
            continue;
        };

        let normalized = normalize_at(definition.value.as_ref(), definition.property_type, today);
        let resolution = resolve(
            frontmatter.get(key),
            &normalized,
            definition.property_type,
            type_hint(key),
            definition.overwrite,
        );
        tracing::debug!(property = key, action = resolution.action(), "resolved property");

        let (action, value) = match resolution {
            Resolution::Skip => continue,
            Resolution::Overwrite(value) => (ChangeKind::Overwrite, value),
            Resolution::Merge(items) => (ChangeKind::Merge, YamlValue::Sequence(items)),
        };

        frontmatter.insert(YamlValue::String(key.to_string()), value.clone());
        changes.push(PropertyChange {
            name: key.to_string(),
            action,
            value,
        });
    }

    changes
}

/// Apply the settings to a note: check the master switch and exclusion
/// rules, then apply every enabled property.
pub fn apply_to_note(note: &Note, settings: &Settings) -> Result<ApplyOutcome> {
    apply_to_note_at(note, settings, Utc::now().date_naive())
}

/// [`apply_to_note`] with an explicit current date.
pub fn apply_to_note_at(note: &Note, settings: &Settings, today: NaiveDate) -> Result<ApplyOutcome> {
    if !settings.enabled {
        return Ok(ApplyOutcome::Disabled);
    }

    let view = note.document_view()?;
    if let Some(reason) = settings.exclusion_matcher().explain(&view) {
        tracing::info!(note = %note.path.display(), ?reason, "note excluded");
        return Ok(ApplyOutcome::Excluded(reason));
    }

    let definitions: Vec<PropertyDefinition> =
        settings.enabled_properties().into_iter().cloned().collect();
    if definitions.is_empty() {
        return Ok(ApplyOutcome::NoProperties);
    }

    let mut frontmatter = view
        .metadata
        .and_then(|metadata| metadata.frontmatter)
        .unwrap_or_default();
    let changes = apply_properties_at(&definitions, &mut frontmatter, |name| settings.type_hint(name), today);

    let note = if changes.is_empty() {
        note.clone()
    } else {
        note.with_frontmatter(&frontmatter)?
    };

    Ok(ApplyOutcome::Applied { changes, note })
}
