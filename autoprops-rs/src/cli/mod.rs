//! CLI command implementations.

pub mod apply;
pub mod args;
pub mod exclude;
pub mod normalize;
pub mod output;
pub mod property;

pub use args::{Cli, Commands};
pub use output::Output;

use serde_yaml::Value as YamlValue;

/// Interpret a value typed on the command line.
///
/// JSON literals (`true`, `5`, `["a", "b"]`, `null`) keep their type;
/// anything else is taken as a plain string.
pub fn parse_raw_value(s: &str) -> YamlValue {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(s) {
        if let Ok(yaml) = serde_json::from_value(json) {
            return yaml;
        }
    }
    YamlValue::String(s.to_string())
}
