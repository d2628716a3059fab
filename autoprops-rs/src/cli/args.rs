//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "autoprops")]
#[command(author, version, about = "Inject configured properties into Obsidian-style notes", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides the configured default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Path to the settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the configured properties to notes
    Apply(ApplyArgs),

    /// Report whether a note is excluded, and by which rule
    #[command(name = "check-excluded")]
    CheckExcluded(CheckExcludedArgs),

    /// Normalize a value for a property type
    Normalize(NormalizeArgs),

    /// Strip characters that are not allowed in tags
    #[command(name = "sanitize-tag")]
    SanitizeTag(SanitizeTagArgs),

    /// Manage property definitions
    Property(PropertyArgs),

    /// Manage exclusion rules and excluded folders
    Exclude(ExcludeArgs),

    /// Turn automatic property application on or off
    Toggle,
}

// === Apply ===

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Notes to update (paths relative to the vault, .md optional)
    pub notes: Vec<String>,

    /// Also update every note matching this glob pattern
    #[arg(long)]
    pub glob: Option<String>,

    /// Update every note in the vault
    #[arg(long, conflicts_with = "glob")]
    pub all: bool,

    /// Show the changes without writing them
    #[arg(long)]
    pub dry_run: bool,
}

// === Check excluded ===

#[derive(Args, Debug)]
pub struct CheckExcludedArgs {
    /// Note to check
    pub note: String,
}

// === Normalize / sanitize ===

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Property type (text, multitext, number, checkbox, date, datetime, tags, aliases)
    #[arg(long = "type", short = 't')]
    pub property_type: String,

    /// Raw value; omit to get the type's default
    pub value: Option<String>,
}

#[derive(Args, Debug)]
pub struct SanitizeTagArgs {
    pub value: String,
}

// === Property management ===

#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommands,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommands {
    /// List property definitions
    List,

    /// Add a property definition
    Add(PropertyFields),

    /// Replace the property definition at an index
    Update {
        index: usize,
        #[command(flatten)]
        fields: PropertyFields,
    },

    /// Remove the property definition at an index
    Remove { index: usize },

    /// Move a property definition to another position
    Move { from: usize, to: usize },

    /// Enable the property definition at an index
    Enable { index: usize },

    /// Disable the property definition at an index
    Disable { index: usize },
}

#[derive(Args, Debug)]
pub struct PropertyFields {
    /// Frontmatter key
    pub name: String,

    /// Property type
    #[arg(long = "type", short = 't', default_value = "text")]
    pub property_type: String,

    /// Value to inject
    #[arg(long)]
    pub value: Option<String>,

    /// Replace existing values instead of merging
    #[arg(long)]
    pub overwrite: bool,

    /// Add the definition disabled
    #[arg(long)]
    pub disabled: bool,
}

// === Exclusions ===

#[derive(Args, Debug)]
pub struct ExcludeArgs {
    #[command(subcommand)]
    pub command: ExcludeCommands,
}

#[derive(Subcommand, Debug)]
pub enum ExcludeCommands {
    /// List exclusion rules and excluded folders
    List,

    /// Add a tag or property exclusion rule
    AddRule {
        /// Rule kind (tag, property)
        #[arg(long, short = 'k')]
        kind: String,

        /// Tag (`#draft`), property key (`archived`) or `key:value`
        pattern: String,
    },

    /// Remove the exclusion rule at an index
    RemoveRule { index: usize },

    /// Add an excluded folder (literal, or a regex when regex mode is on)
    AddFolder { folder: String },

    /// Remove the excluded folder at an index
    RemoveFolder { index: usize },

    /// Match excluded folders as regular expressions
    UseRegex {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}
