//! `exclude` commands: edit exclusion rules and excluded folders.

use crate::cli::args::{ExcludeArgs, ExcludeCommands};
use crate::cli::output::{MessageResponse, Output};
use crate::config::{ExcludedFolder, Settings};
use crate::error::Result;
use crate::types::{ExclusionKind, ExclusionRule};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ExclusionListResponse<'a> {
    pub use_regex_for_excluded_folders: bool,
    pub exclusion_rules: &'a [ExclusionRule],
    pub excluded_folders: &'a [ExcludedFolder],
}

pub fn run(settings: &mut Settings, config_path: &Path, args: &ExcludeArgs, output: &Output) -> Result<()> {
    let message = match &args.command {
        ExcludeCommands::List => {
            return output.print(&ExclusionListResponse {
                use_regex_for_excluded_folders: settings.use_regex_for_excluded_folders,
                exclusion_rules: &settings.exclusion_rules,
                excluded_folders: &settings.excluded_folders,
            });
        }
        ExcludeCommands::AddRule { kind, pattern } => {
            let kind: ExclusionKind = kind.parse()?;
            settings.add_exclusion_rule(ExclusionRule {
                kind,
                pattern: pattern.clone(),
            });
            format!("Added exclusion rule '{}'", pattern)
        }
        ExcludeCommands::RemoveRule { index } => {
            let removed = settings.remove_exclusion_rule(*index)?;
            format!("Removed exclusion rule '{}'", removed.pattern)
        }
        ExcludeCommands::AddFolder { folder } => {
            settings.add_excluded_folder(folder.clone());
            format!("Excluded folder '{}'", folder)
        }
        ExcludeCommands::RemoveFolder { index } => {
            let removed = settings.remove_excluded_folder(*index)?;
            format!("Removed excluded folder '{}'", removed.folder)
        }
        ExcludeCommands::UseRegex { enabled } => {
            settings.use_regex_for_excluded_folders = *enabled;
            if *enabled {
                "Excluded folders are matched as regular expressions".to_string()
            } else {
                "Excluded folders are matched literally".to_string()
            }
        }
    };

    settings.save_to(config_path)?;
    tracing::info!(path = %config_path.display(), "settings saved");
    output.print(&MessageResponse::new(message))
}
