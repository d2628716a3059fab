//! Note representation.

use crate::error::Result;
use crate::parser::{self, parse_inline_tags, split_frontmatter};
use crate::types::DocumentView;
use serde_yaml::Mapping;
use std::path::{Component, Path, PathBuf};

/// A Markdown note in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Path relative to vault root (e.g., "Inbox/Idea.md").
    pub path: PathBuf,

    /// Raw content of the note.
    pub content: String,
}

impl Note {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Load a note from disk.
    pub fn load(vault_root: &Path, relative_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(vault_root.join(relative_path))?;
        Ok(Self::new(relative_path, content))
    }

    /// Save the note to disk.
    pub fn save(&self, vault_root: &Path) -> Result<()> {
        let full_path = vault_root.join(&self.path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, &self.content)?;
        Ok(())
    }

    /// File name without the `.md` extension.
    pub fn basename(&self) -> &str {
        self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
    }

    /// Folder containing the note, `/`-separated, empty at the vault root.
    /// `.` components are skipped.
    pub fn folder(&self) -> String {
        self.path
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default()
    }

    /// Parse the frontmatter block.
    pub fn frontmatter(&self) -> Result<Option<Mapping>> {
        parser::parse_frontmatter(&self.content, &self.path)
    }

    /// Content below the frontmatter.
    pub fn body(&self) -> &str {
        split_frontmatter(&self.content).body
    }

    /// Inline tags in the body, with their leading `#`.
    pub fn inline_tags(&self) -> Vec<String> {
        parse_inline_tags(self.body())
    }

    /// Snapshot used for exclusion matching.
    pub fn document_view(&self) -> Result<DocumentView> {
        Ok(DocumentView::new(self.folder()).with_metadata(self.inline_tags(), self.frontmatter()?))
    }

    /// A copy of the note with its frontmatter replaced.
    pub fn with_frontmatter(&self, frontmatter: &Mapping) -> Result<Self> {
        let content = parser::replace_frontmatter(&self.content, frontmatter)?;
        Ok(Self::new(self.path.clone(), content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_basename_and_folder() {
        let note = Note::new("Projects/2024/Plan.md", "");
        assert_eq!(note.basename(), "Plan");
        assert_eq!(note.folder(), "Projects/2024");

        let root = Note::new("Top.md", "");
        assert_eq!(root.folder(), "");

        let dotted = Note::new("./Templates/./t.md", "");
        assert_eq!(dotted.folder(), "Templates");
        assert_eq!(Note::new("./Top.md", "").folder(), "");
    }

    #[test]
    fn test_document_view() {
        let note = Note::new(
            "Inbox/Idea.md",
            "---\nstatus: open\ntags: [a]\n---\nText #draft\n",
        );
        let view = note.document_view().unwrap();
        assert_eq!(view.folder, "Inbox");

        let metadata = view.metadata.unwrap();
        assert_eq!(metadata.tags, vec!["#draft"]);
        let fm = metadata.frontmatter.unwrap();
        assert_eq!(fm.get("status").and_then(|v| v.as_str()), Some("open"));
    }

    #[test]
    fn test_frontmatter_tags_are_not_inline_tags() {
        let note = Note::new("a.md", "---\ntitle: '#nope'\n---\nbody");
        assert!(note.inline_tags().is_empty());
    }

    #[test]
    fn test_with_frontmatter_keeps_body() {
        let note = Note::new("a.md", "# Title\n\nBody");
        let mut fm = Mapping::new();
        fm.insert("done".into(), false.into());

        let updated = note.with_frontmatter(&fm).unwrap();
        assert_eq!(updated.content, "---\ndone: false\n---\n# Title\n\nBody");
        assert_eq!(updated.body(), "# Title\n\nBody");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let note = Note::new("sub/n.md", "hello");
        note.save(dir.path()).unwrap();

        let loaded = Note::load(dir.path(), Path::new("sub/n.md")).unwrap();
        assert_eq!(loaded, note);
    }
}
