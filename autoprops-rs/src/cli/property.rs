//! `property` and `toggle` commands: edit the settings file.

use crate::cli::args::{PropertyArgs, PropertyCommands, PropertyFields};
use crate::cli::output::{MessageResponse, Output};
use crate::cli::parse_raw_value;
use crate::config::Settings;
use crate::error::Result;
use crate::types::{PropertyDefinition, PropertyType};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PropertyListResponse<'a> {
    pub enabled: bool,
    pub properties: &'a [PropertyDefinition],
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub enabled: bool,
    pub message: String,
}

impl PropertyFields {
    fn to_definition(&self) -> Result<PropertyDefinition> {
        let property_type: PropertyType = self.property_type.parse()?;
        let value = self.value.as_deref().map(parse_raw_value);
        let mut definition = PropertyDefinition::new(self.name.trim(), property_type, value)
            .with_overwrite(self.overwrite);
        definition.enabled = !self.disabled;
        Ok(definition)
    }
}

pub fn run(settings: &mut Settings, config_path: &Path, args: &PropertyArgs, output: &Output) -> Result<()> {
    let message = match &args.command {
        PropertyCommands::List => {
            return output.print(&PropertyListResponse {
                enabled: settings.enabled,
                properties: &settings.properties,
            });
        }
        PropertyCommands::Add(fields) => {
            let definition = fields.to_definition()?;
            let message = format!("Added property '{}' at index {}", definition.name, settings.properties.len());
            settings.add_property(definition);
            message
        }
        PropertyCommands::Update { index, fields } => {
            settings.update_property(*index, fields.to_definition()?)?;
            format!("Updated property {}", index)
        }
        PropertyCommands::Remove { index } => {
            let removed = settings.remove_property(*index)?;
            format!("Removed property '{}'", removed.name)
        }
        PropertyCommands::Move { from, to } => {
            if settings.move_property(*from, *to)? {
                format!("Moved property {} to {}", from, to)
            } else {
                tracing::debug!(from, to, "move target out of range");
                format!("Property {} left in place: index {} is out of range", from, to)
            }
        }
        PropertyCommands::Enable { index } => {
            settings.set_property_enabled(*index, true)?;
            format!("Enabled property {}", index)
        }
        PropertyCommands::Disable { index } => {
            settings.set_property_enabled(*index, false)?;
            format!("Disabled property {}", index)
        }
    };

    settings.save_to(config_path)?;
    tracing::info!(path = %config_path.display(), "settings saved");
    output.print(&MessageResponse::new(message))
}

pub fn toggle(settings: &mut Settings, config_path: &Path, output: &Output) -> Result<()> {
    let enabled = settings.toggle_enabled();
    settings.save_to(config_path)?;

    let message = if enabled {
        "Autoprops enabled"
    } else {
        "Autoprops disabled"
    };
    output.print(&ToggleResponse {
        enabled,
        message: message.to_string(),
    })
}
