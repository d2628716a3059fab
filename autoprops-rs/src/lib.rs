//! Autoprops - inject configured properties into Obsidian-style notes.
//!
//! # Overview
//!
//! Autoprops keeps a list of property definitions (name, type, value) and
//! applies them to a note's YAML frontmatter:
//! - Values are normalized for their declared type ([`normalize`])
//! - Tags are stripped of characters the host does not allow ([`sanitize`])
//! - Each value is resolved against what the note already holds: skipped,
//!   overwritten, or merged into a deduplicated list ([`merge`])
//! - Notes in excluded folders, or carrying excluded tags or properties,
//!   are left alone ([`exclusion`])
//!
//! # Example
//!
//! ```
//! use autoprops::{PropertyDefinition, PropertyType, apply_properties};
//! use serde_yaml::{Mapping, Value};
//!
//! let definitions = vec![PropertyDefinition::new(
//!     "tags",
//!     PropertyType::Tags,
//!     Some(Value::String("inbox, #to do!".into())),
//! )];
//!
//! let mut frontmatter: Mapping = serde_yaml::from_str("tags: [inbox]").unwrap();
//! let changes = apply_properties(&definitions, &mut frontmatter, |_| None);
//!
//! assert_eq!(changes.len(), 1);
//! assert_eq!(
//!     frontmatter.get("tags"),
//!     Some(&serde_yaml::from_str::<Value>("[inbox, todo]").unwrap())
//! );
//! ```

pub mod apply;
pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod merge;
pub mod normalize;
pub mod note;
pub mod parser;
pub mod sanitize;
pub mod types;
pub mod value;
pub mod vault;

// Re-export main types at crate root
pub use apply::{ApplyOutcome, PropertyChange, apply_properties, apply_to_note};
pub use config::Settings;
pub use error::{AutopropsError, Result};
pub use exclusion::{ExclusionMatcher, ExclusionReason, is_excluded};
pub use merge::{Resolution, resolve};
pub use normalize::{NormalizedValue, normalize};
pub use note::Note;
pub use sanitize::sanitize_tag;
pub use types::*;
pub use vault::Vault;
