//! Error types and exit codes for Autoprops.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOTE_NOT_FOUND: i32 = 2;
    pub const INVALID_FRONTMATTER: i32 = 5;
    pub const CONFIG_ERROR: i32 = 6;
    pub const NOTE_EXCLUDED: i32 = 7;
}

/// Main error type for Autoprops operations.
///
/// The property engine itself never fails; these errors come from the
/// settings file, the vault on disk, and the CLI surface around it.
#[derive(Error, Debug)]
pub enum AutopropsError {
    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Invalid note path (must stay inside the vault): {0}")]
    InvalidNotePath(String),

    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Property index {index} out of range (settings have {len} properties)")]
    PropertyIndexOutOfRange { index: usize, len: usize },

    #[error("Exclusion {index} out of range (settings have {len})")]
    ExclusionIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown property type: {0}")]
    UnknownPropertyType(String),

    #[error("Unknown exclusion rule kind: {0}")]
    UnknownExclusionKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

impl AutopropsError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.exit_status().code()
    }

    /// The [`ExitCode`] this error maps to.
    pub fn exit_status(&self) -> ExitCode {
        match self {
            AutopropsError::NoteNotFound(_) => ExitCode::NoteNotFound,
            AutopropsError::InvalidFrontmatter { .. } => ExitCode::InvalidFrontmatter,
            AutopropsError::ConfigError(_)
            | AutopropsError::TomlParse(_)
            | AutopropsError::TomlSerialize(_)
            | AutopropsError::PropertyIndexOutOfRange { .. }
            | AutopropsError::ExclusionIndexOutOfRange { .. }
            | AutopropsError::UnknownPropertyType(_)
            | AutopropsError::UnknownExclusionKind(_) => ExitCode::ConfigError,
            _ => ExitCode::GeneralError,
        }
    }
}

/// Result type alias for Autoprops operations.
pub type Result<T> = std::result::Result<T, AutopropsError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    NoteNotFound,
    InvalidFrontmatter,
    ConfigError,
    NoteExcluded,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::NoteNotFound => exit_code::NOTE_NOT_FOUND,
            ExitCode::InvalidFrontmatter => exit_code::INVALID_FRONTMATTER,
            ExitCode::ConfigError => exit_code::CONFIG_ERROR,
            ExitCode::NoteExcluded => exit_code::NOTE_EXCLUDED,
        }
    }
}
