//! YAML frontmatter splitting, parsing and rendering.

use crate::error::{AutopropsError, Result};
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::Path;

/// A note split into its frontmatter block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML between the `---` delimiters, if the note has a block.
    pub yaml: Option<&'a str>,
    /// Everything after the closing delimiter.
    pub body: &'a str,
}

/// Split content into frontmatter and body.
///
/// The block must open with `---` on the very first line and close with a
/// line that is exactly `---`. Anything else is treated as body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit { yaml: None, body: content };

    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return no_frontmatter;
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return FrontmatterSplit {
                yaml: Some(rest[..offset].trim_end_matches(['\r', '\n'])),
                body: &rest[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

/// Parse the frontmatter block into a mapping.
///
/// An empty block is an empty mapping; a block that is not a mapping is an
/// error.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<Option<Mapping>> {
    let Some(yaml) = split_frontmatter(content).yaml else {
        return Ok(None);
    };

    let invalid = |message: String| AutopropsError::InvalidFrontmatter {
        path: path.to_path_buf(),
        message,
    };

    let value: YamlValue = serde_yaml::from_str(yaml).map_err(|e| invalid(e.to_string()))?;
    match value {
        YamlValue::Null => Ok(Some(Mapping::new())),
        YamlValue::Mapping(map) => Ok(Some(map)),
        _ => Err(invalid("Frontmatter is not a mapping".to_string())),
    }
}

/// Render a mapping as a delimited frontmatter block.
pub fn render_frontmatter(frontmatter: &Mapping) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok("---\n---\n".to_string());
    }
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// Replace (or add) the frontmatter block of `content`.
pub fn replace_frontmatter(content: &str, frontmatter: &Mapping) -> Result<String> {
    let split = split_frontmatter(content);
    Ok(format!("{}{}", render_frontmatter(frontmatter)?, split.body))
}
