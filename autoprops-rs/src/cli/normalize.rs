//! `normalize` and `sanitize-tag` commands.

use crate::cli::args::{NormalizeArgs, SanitizeTagArgs};
use crate::cli::output::Output;
use crate::cli::parse_raw_value;
use crate::error::Result;
use crate::normalize::normalize;
use crate::sanitize::sanitize_tag;
use crate::types::PropertyType;
use serde::Serialize;
use serde_yaml::Value as YamlValue;

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub value: YamlValue,
}

#[derive(Debug, Serialize)]
pub struct SanitizeTagResponse {
    pub input: String,
    pub tag: String,
}

pub fn run_normalize(args: &NormalizeArgs, output: &Output) -> Result<()> {
    let property_type: PropertyType = args.property_type.parse()?;
    let raw = args.value.as_deref().map(parse_raw_value);
    let normalized = normalize(raw.as_ref(), property_type);

    output.print(&NormalizeResponse {
        property_type,
        value: normalized.to_yaml(),
    })
}

pub fn run_sanitize_tag(args: &SanitizeTagArgs, output: &Output) -> Result<()> {
    output.print(&SanitizeTagResponse {
        input: args.value.clone(),
        tag: sanitize_tag(&args.value),
    })
}
