//! Vault representation and note lookup.

use crate::error::{AutopropsError, Result};
use crate::note::Note;
use glob::glob;
use std::path::{Component, Path, PathBuf};

/// An Obsidian-style vault: a directory of Markdown notes.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AutopropsError::VaultNotFound(root));
        }
        Ok(Self { root })
    }

    /// Normalize a note path: add the .md extension if needed and drop `.`
    /// components. Paths that leave the vault (`..`, absolute) are rejected.
    pub fn normalize_note_path(&self, path: &str) -> Result<PathBuf> {
        let trimmed = path.trim();
        let with_extension = if trimmed.ends_with(".md") {
            PathBuf::from(trimmed)
        } else {
            PathBuf::from(format!("{}.md", trimmed))
        };

        let mut normalized = PathBuf::new();
        for component in with_extension.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(AutopropsError::InvalidNotePath(trimmed.to_string()));
                }
            }
        }
        Ok(normalized)
    }

    pub fn note_exists(&self, relative_path: &Path) -> bool {
        self.root.join(relative_path).is_file()
    }

    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        if !self.note_exists(relative_path) {
            return Err(AutopropsError::NoteNotFound(relative_path.to_path_buf()));
        }
        Note::load(&self.root, relative_path)
    }

    pub fn save_note(&self, note: &Note) -> Result<()> {
        note.save(&self.root)
    }

    /// List notes matching a glob pattern relative to the vault root,
    /// skipping hidden files and folders.
    pub fn list_notes_matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let full_pattern = self.root.join(pattern);
        let mut notes = Vec::new();

        for entry in glob(&full_pattern.to_string_lossy())? {
            match entry {
                Ok(path) => {
                    let is_markdown = path.extension().is_some_and(|e| e == "md");
                    if !path.is_file() || !is_markdown {
                        continue;
                    }
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        let hidden = relative
                            .components()
                            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));
                        if !hidden {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "glob error");
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    /// List every note in the vault.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        self.list_notes_matching("**/*.md")
    }
}
