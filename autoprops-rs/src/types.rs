//! Shared types for Autoprops.

use crate::error::AutopropsError;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::fmt;
use std::str::FromStr;

/// Declared type of a property, mirroring Obsidian's property widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Text,
    Multitext,
    Number,
    Checkbox,
    Date,
    Datetime,
    Tags,
    Aliases,
}

impl PropertyType {
    /// Every property type, in the order the settings UI lists them.
    pub const ALL: [PropertyType; 8] = [
        PropertyType::Text,
        PropertyType::Multitext,
        PropertyType::Number,
        PropertyType::Checkbox,
        PropertyType::Date,
        PropertyType::Datetime,
        PropertyType::Tags,
        PropertyType::Aliases,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Text => "text",
            PropertyType::Multitext => "multitext",
            PropertyType::Number => "number",
            PropertyType::Checkbox => "checkbox",
            PropertyType::Date => "date",
            PropertyType::Datetime => "datetime",
            PropertyType::Tags => "tags",
            PropertyType::Aliases => "aliases",
        }
    }

    /// Whether values of this type may accumulate into a list.
    pub fn is_appendable(self) -> bool {
        match self {
            PropertyType::Number
            | PropertyType::Date
            | PropertyType::Datetime
            | PropertyType::Checkbox => false,
            PropertyType::Text
            | PropertyType::Multitext
            | PropertyType::Tags
            | PropertyType::Aliases => true,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = AutopropsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| AutopropsError::UnknownPropertyType(s.to_string()))
    }
}

/// Whether two property types can be combined into a list.
///
/// `hint` is the host's own declared type for the key, when known.
pub fn can_be_appended(declared: PropertyType, hint: Option<PropertyType>) -> bool {
    declared.is_appendable() && hint.is_none_or(PropertyType::is_appendable)
}

/// A user-authored rule describing a property to inject into new notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Frontmatter key. Only actionable when non-empty after trimming.
    pub name: String,

    #[serde(rename = "type")]
    pub property_type: PropertyType,

    /// Raw value as typed by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<YamlValue>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Replace any existing value instead of merging with it.
    #[serde(default)]
    pub overwrite: bool,
}

fn default_true() -> bool {
    true
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, property_type: PropertyType, value: Option<YamlValue>) -> Self {
        Self {
            name: name.into(),
            property_type,
            value,
            enabled: true,
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// The trimmed key, or `None` when the name is blank.
    pub fn key(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// What an exclusion rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionKind {
    Tag,
    Property,
}

impl FromStr for ExclusionKind {
    type Err = AutopropsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tag" => Ok(ExclusionKind::Tag),
            "property" => Ok(ExclusionKind::Property),
            _ => Err(AutopropsError::UnknownExclusionKind(s.to_string())),
        }
    }
}

/// A tag or frontmatter `key` / `key:value` pattern that blocks application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    #[serde(rename = "type")]
    pub kind: ExclusionKind,

    #[serde(rename = "value")]
    pub pattern: String,
}

impl ExclusionRule {
    pub fn tag(pattern: impl Into<String>) -> Self {
        Self {
            kind: ExclusionKind::Tag,
            pattern: pattern.into(),
        }
    }

    pub fn property(pattern: impl Into<String>) -> Self {
        Self {
            kind: ExclusionKind::Property,
            pattern: pattern.into(),
        }
    }
}

/// A folder that notes must not live in, matched literally or as a regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRule {
    pub pattern: String,
    pub use_regex: bool,
}

impl FolderRule {
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            use_regex: false,
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            use_regex: true,
        }
    }
}

/// Read-only snapshot of a note as seen by the exclusion matcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentView {
    /// Folder containing the note, relative to the vault root.
    pub folder: String,

    /// Parsed metadata, when the host has it available.
    pub metadata: Option<DocumentMetadata>,
}

/// Tags and frontmatter of a note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    /// Inline tags from the note body, usually with their leading `#`.
    pub tags: Vec<String>,

    pub frontmatter: Option<Mapping>,
}

impl DocumentView {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, tags: Vec<String>, frontmatter: Option<Mapping>) -> Self {
        self.metadata = Some(DocumentMetadata { tags, frontmatter });
        self
    }
}
