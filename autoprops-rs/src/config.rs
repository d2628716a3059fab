//! Settings: the property definitions and exclusion rules, stored as TOML.
//!
//! ```toml
//! enabled = true
//! show_notifications = true
//!
//! [[properties]]
//! name = "tags"
//! type = "tags"
//! value = "inbox"
//!
//! [[exclusion_rules]]
//! type = "tag"
//! value = "#template"
//!
//! [[excluded_folders]]
//! folder = "Templates"
//! ```

use crate::error::{AutopropsError, Result};
use crate::exclusion::ExclusionMatcher;
use crate::types::{ExclusionRule, FolderRule, PropertyDefinition, PropertyType};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative settings file.
pub const CONFIG_ENV_VAR: &str = "AUTOPROPS_CONFIG";

/// A folder whose notes never receive properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedFolder {
    pub folder: String,
}

/// Autoprops settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master switch. When off, nothing is applied.
    pub enabled: bool,

    /// Report how many properties were added to each note.
    pub show_notifications: bool,

    /// Treat every excluded folder as a regular expression.
    pub use_regex_for_excluded_folders: bool,

    /// Default vault, used when `--vault` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    /// Host-declared property types, keyed by property name.
    #[serde(deserialize_with = "deserialize_type_map")]
    pub property_types: BTreeMap<String, PropertyType>,

    #[serde(deserialize_with = "deserialize_valid_entries")]
    pub properties: Vec<PropertyDefinition>,

    #[serde(deserialize_with = "deserialize_valid_entries")]
    pub exclusion_rules: Vec<ExclusionRule>,

    pub excluded_folders: Vec<ExcludedFolder>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_notifications: true,
            use_regex_for_excluded_folders: false,
            vault: None,
            property_types: BTreeMap::new(),
            properties: Vec::new(),
            exclusion_rules: Vec::new(),
            excluded_folders: Vec::new(),
        }
    }
}

/// Deserialize a list entry by entry, dropping (and logging) entries that
/// do not parse so one bad rule never hides the others.
fn deserialize_valid_entries<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Vec::<toml::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry.try_into::<T>() {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping invalid settings entry");
                None
            }
        })
        .collect())
}

/// Host type hints, skipping names whose type is not recognized.
fn deserialize_type_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, PropertyType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, toml::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, entry)| match entry.try_into::<PropertyType>() {
            Ok(ty) => Some((name, ty)),
            Err(e) => {
                tracing::warn!(property = %name, error = %e, "skipping unknown property type hint");
                None
            }
        })
        .collect())
}

/// Locate the settings file: an explicit path, then `$AUTOPROPS_CONFIG`,
/// then `<config dir>/autoprops/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("autoprops").join("config.toml"))
        .ok_or_else(|| AutopropsError::ConfigError("Could not determine config directory".to_string()))
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the vault root: the CLI flag, then the configured default,
    /// then the current directory.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        match cli_vault.or(self.vault.as_deref()) {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Enabled property definitions, in order.
    pub fn enabled_properties(&self) -> Vec<&PropertyDefinition> {
        self.properties.iter().filter(|p| p.enabled).collect()
    }

    /// The host's declared type for a property name, matched
    /// case-insensitively.
    pub fn type_hint(&self, name: &str) -> Option<PropertyType> {
        let lower = name.to_lowercase();
        self.property_types
            .iter()
            .find(|(key, _)| key.to_lowercase() == lower)
            .map(|(_, ty)| *ty)
    }

    /// Folder rules as seen by the exclusion matcher.
    pub fn folder_rules(&self) -> Vec<FolderRule> {
        self.excluded_folders
            .iter()
            .map(|excluded| FolderRule {
                pattern: excluded.folder.clone(),
                use_regex: self.use_regex_for_excluded_folders,
            })
            .collect()
    }

    pub fn exclusion_matcher(&self) -> ExclusionMatcher {
        ExclusionMatcher::new(&self.folder_rules(), &self.exclusion_rules)
    }

    pub fn add_property(&mut self, property: PropertyDefinition) {
        self.properties.push(property);
    }

    pub fn update_property(&mut self, index: usize, property: PropertyDefinition) -> Result<()> {
        let len = self.properties.len();
        let slot = self
            .properties
            .get_mut(index)
            .ok_or(AutopropsError::PropertyIndexOutOfRange { index, len })?;
        *slot = property;
        Ok(())
    }

    pub fn remove_property(&mut self, index: usize) -> Result<PropertyDefinition> {
        if index >= self.properties.len() {
            return Err(AutopropsError::PropertyIndexOutOfRange {
                index,
                len: self.properties.len(),
            });
        }
        Ok(self.properties.remove(index))
    }

    /// Move a property to a new position.
    ///
    /// Returns `false` without changing anything when `to` is out of range.
    pub fn move_property(&mut self, from: usize, to: usize) -> Result<bool> {
        let len = self.properties.len();
        if from >= len {
            return Err(AutopropsError::PropertyIndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Ok(false);
        }

        let property = self.properties.remove(from);
        self.properties.insert(to, property);
        Ok(true)
    }

    pub fn set_property_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        let len = self.properties.len();
        let property = self
            .properties
            .get_mut(index)
            .ok_or(AutopropsError::PropertyIndexOutOfRange { index, len })?;
        property.enabled = enabled;
        Ok(())
    }

    pub fn add_exclusion_rule(&mut self, rule: ExclusionRule) {
        self.exclusion_rules.push(rule);
    }

    pub fn remove_exclusion_rule(&mut self, index: usize) -> Result<ExclusionRule> {
        let len = self.exclusion_rules.len();
        if index >= len {
            return Err(AutopropsError::ExclusionIndexOutOfRange { index, len });
        }
        Ok(self.exclusion_rules.remove(index))
    }

    pub fn add_excluded_folder(&mut self, folder: impl Into<String>) {
        self.excluded_folders.push(ExcludedFolder { folder: folder.into() });
    }

    pub fn remove_excluded_folder(&mut self, index: usize) -> Result<ExcludedFolder> {
        let len = self.excluded_folders.len();
        if index >= len {
            return Err(AutopropsError::ExclusionIndexOutOfRange { index, len });
        }
        Ok(self.excluded_folders.remove(index))
    }

    /// Flip the master switch and return the new state.
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExclusionKind;
    use pretty_assertions::assert_eq;
    use serde_yaml::Value as YamlValue;
    use tempfile::TempDir;

    fn prop(name: &str) -> PropertyDefinition {
        PropertyDefinition::new(name, PropertyType::Text, Some(YamlValue::String("v".into())))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.enabled);
        assert!(settings.show_notifications);
        assert!(settings.properties.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
enabled = true
use_regex_for_excluded_folders = true

[property_types]
Status = "checkbox"

[[properties]]
name = "tags"
type = "tags"
value = "inbox, todo"

[[properties]]
name = "reviewed"
type = "checkbox"
value = false
enabled = false
overwrite = true

[[exclusion_rules]]
type = "property"
value = "status:done"

[[excluded_folders]]
folder = "^Templates"
"#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.properties.len(), 2);
        assert_eq!(settings.properties[0].property_type, PropertyType::Tags);
        assert!(settings.properties[0].enabled);
        assert!(!settings.properties[0].overwrite);
        assert_eq!(settings.properties[1].value, Some(YamlValue::Bool(false)));
        assert!(settings.properties[1].overwrite);
        assert_eq!(settings.enabled_properties().len(), 1);
        assert_eq!(settings.exclusion_rules[0].kind, ExclusionKind::Property);
        assert_eq!(settings.folder_rules(), vec![FolderRule::regex("^Templates")]);
        assert_eq!(settings.type_hint("status"), Some(PropertyType::Checkbox));
        assert_eq!(settings.type_hint("other"), None);
        assert!(settings.show_notifications);
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let toml = r##"
[property_types]
status = "checkbox"
mood = "emoji"

[[properties]]
name = "ok"
type = "text"
value = "kept"

[[properties]]
name = "bad"
type = "color"

[[exclusion_rules]]
type = "folder"
value = "Archive"

[[exclusion_rules]]
type = "tag"
value = "#template"
"##;
        let settings: Settings = toml::from_str(toml).unwrap();
        let names: Vec<_> = settings.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ok"]);
        assert_eq!(settings.exclusion_rules, vec![ExclusionRule::tag("#template")]);
        assert_eq!(settings.type_hint("status"), Some(PropertyType::Checkbox));
        assert_eq!(settings.type_hint("mood"), None);
    }

    #[test]
    fn test_load_keeps_valid_rules_beside_invalid_ones() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[[properties]]\nname = \"ok\"\ntype = \"text\"\n\n[[properties]]\nname = \"bad\"\ntype = \"color\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.enabled_properties().len(), 1);
        assert_eq!(settings.properties[0].name, "ok");
    }

    #[test]
    fn test_malformed_file_is_still_an_error() {
        assert!(toml::from_str::<Settings>("properties = \"nope\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.add_property(prop("status").with_overwrite(true));
        settings.exclusion_rules.push(ExclusionRule::tag("#template"));
        settings.excluded_folders.push(ExcludedFolder { folder: "Templates".into() });
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_property_crud() {
        let mut settings = Settings::default();
        settings.add_property(prop("a"));
        settings.add_property(prop("b"));
        settings.add_property(prop("c"));

        assert!(settings.move_property(0, 2).unwrap());
        let names: Vec<_> = settings.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);

        assert!(!settings.move_property(0, 3).unwrap());
        assert!(settings.move_property(5, 0).is_err());

        settings.update_property(1, prop("z")).unwrap();
        assert_eq!(settings.properties[1].name, "z");
        assert!(settings.update_property(9, prop("q")).is_err());

        let removed = settings.remove_property(0).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(settings.properties.len(), 2);
        assert!(settings.remove_property(2).is_err());

        settings.set_property_enabled(0, false).unwrap();
        assert_eq!(settings.enabled_properties().len(), 1);
    }

    #[test]
    fn test_exclusion_crud() {
        let mut settings = Settings::default();
        settings.add_exclusion_rule(ExclusionRule::tag("#template"));
        settings.add_exclusion_rule(ExclusionRule::property("status:done"));
        settings.add_excluded_folder("Templates");

        let removed = settings.remove_exclusion_rule(0).unwrap();
        assert_eq!(removed, ExclusionRule::tag("#template"));
        assert_eq!(settings.exclusion_rules, vec![ExclusionRule::property("status:done")]);
        assert!(matches!(
            settings.remove_exclusion_rule(3),
            Err(AutopropsError::ExclusionIndexOutOfRange { index: 3, len: 1 })
        ));

        assert_eq!(settings.remove_excluded_folder(0).unwrap().folder, "Templates");
        assert!(settings.remove_excluded_folder(0).is_err());
    }

    #[test]
    fn test_toggle_enabled() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_enabled());
        assert!(settings.toggle_enabled());
    }

    #[test]
    fn test_resolve_vault_path_prefers_cli() {
        let settings = Settings {
            vault: Some(PathBuf::from("/configured")),
            ..Settings::default()
        };
        assert_eq!(
            settings.resolve_vault_path(Some(Path::new("/cli"))).unwrap(),
            PathBuf::from("/cli")
        );
        assert_eq!(settings.resolve_vault_path(None).unwrap(), PathBuf::from("/configured"));
    }

    #[test]
    fn test_explicit_config_path() {
        assert_eq!(
            config_path(Some(Path::new("/tmp/x.toml"))).unwrap(),
            PathBuf::from("/tmp/x.toml")
        );
    }
}
