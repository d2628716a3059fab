//! `apply` and `check-excluded` commands.

use crate::apply::{ApplyOutcome, PropertyChange, apply_to_note};
use crate::cli::args::{ApplyArgs, CheckExcludedArgs};
use crate::cli::output::Output;
use crate::config::Settings;
use crate::error::{AutopropsError, ExitCode, Result};
use crate::exclusion::ExclusionReason;
use crate::vault::Vault;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    Updated,
    Unchanged,
    Excluded,
    Disabled,
    Error,
}

#[derive(Debug, Serialize)]
pub struct NoteResult {
    pub path: String,
    pub status: NoteStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<PropertyChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_by: Option<ExclusionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NoteResult {
    fn new(path: String, status: NoteStatus) -> Self {
        Self {
            path,
            status,
            changes: Vec::new(),
            excluded_by: None,
            message: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub dry_run: bool,
    pub total_changed: usize,
    pub failed: usize,
    pub notes: Vec<NoteResult>,
}

#[derive(Debug, Serialize)]
pub struct CheckExcludedResponse {
    pub path: String,
    pub excluded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_by: Option<ExclusionReason>,
}

/// Collect the notes named on the command line plus glob matches, in
/// order, without repeats.
fn collect_targets(vault: &Vault, args: &ApplyArgs) -> Result<Vec<PathBuf>> {
    let mut targets = args
        .notes
        .iter()
        .map(|note| vault.normalize_note_path(note))
        .collect::<Result<Vec<PathBuf>>>()?;

    if args.all {
        targets.extend(vault.list_notes()?);
    } else if let Some(ref pattern) = args.glob {
        targets.extend(vault.list_notes_matching(pattern)?);
    }

    let mut seen = std::collections::HashSet::new();
    targets.retain(|path| seen.insert(path.clone()));

    if targets.is_empty() {
        return Err(AutopropsError::Other(
            "No notes given: pass note paths, --glob or --all".to_string(),
        ));
    }
    Ok(targets)
}

/// Apply the settings to one note, saving it unless this is a dry run.
fn apply_one(vault: &Vault, settings: &Settings, path: &Path, dry_run: bool, output: &Output) -> Result<NoteResult> {
    let note = vault.load_note(path)?;
    let path_str = path.to_string_lossy().to_string();

    let result = match apply_to_note(&note, settings)? {
        ApplyOutcome::Disabled => NoteResult::new(path_str, NoteStatus::Disabled),
        ApplyOutcome::Excluded(reason) => NoteResult {
            excluded_by: Some(reason),
            ..NoteResult::new(path_str, NoteStatus::Excluded)
        },
        ApplyOutcome::NoProperties => NoteResult::new(path_str, NoteStatus::Unchanged),
        ApplyOutcome::Applied { changes, .. } if changes.is_empty() => {
            NoteResult::new(path_str, NoteStatus::Unchanged)
        }
        ApplyOutcome::Applied { changes, note: updated } => {
            if !dry_run {
                vault.save_note(&updated)?;
                if settings.show_notifications {
                    output.info(&format!(
                        "Added {} properties to \"{}\"",
                        changes.len(),
                        updated.basename()
                    ));
                }
            }
            NoteResult {
                changes,
                ..NoteResult::new(path_str, NoteStatus::Updated)
            }
        }
    };
    Ok(result)
}

/// Apply to every target. A note that cannot be read, parsed or written is
/// reported and skipped; the exit code is that of the first failure.
pub fn apply(vault: &Vault, settings: &Settings, args: &ApplyArgs, output: &Output) -> Result<ExitCode> {
    let targets = collect_targets(vault, args)?;
    let mut results = Vec::with_capacity(targets.len());
    let mut first_failure: Option<ExitCode> = None;

    for path in targets {
        match apply_one(vault, settings, &path, args.dry_run, output) {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::warn!(note = %path.display(), error = %e, "failed to apply properties");
                output.info(&format!("Error: {}", e));
                first_failure.get_or_insert(e.exit_status());
                results.push(NoteResult {
                    message: Some(e.to_string()),
                    ..NoteResult::new(path.to_string_lossy().to_string(), NoteStatus::Error)
                });
            }
        }
    }

    if !settings.enabled {
        output.info("Automatic property application is disabled; run `autoprops toggle` to enable it");
    }

    output.print(&ApplyResponse {
        dry_run: args.dry_run,
        total_changed: results.iter().map(|r| r.changes.len()).sum(),
        failed: results.iter().filter(|r| r.status == NoteStatus::Error).count(),
        notes: results,
    })?;

    Ok(first_failure.unwrap_or(ExitCode::Success))
}

pub fn check_excluded(
    vault: &Vault,
    settings: &Settings,
    args: &CheckExcludedArgs,
    output: &Output,
) -> Result<ExitCode> {
    let path = vault.normalize_note_path(&args.note)?;
    let note = vault.load_note(&path)?;
    let reason = settings.exclusion_matcher().explain(&note.document_view()?);

    let code = if reason.is_some() {
        ExitCode::NoteExcluded
    } else {
        ExitCode::Success
    };

    output.print(&CheckExcludedResponse {
        path: path.to_string_lossy().to_string(),
        excluded: reason.is_some(),
        excluded_by: reason,
    })?;

    Ok(code)
}
