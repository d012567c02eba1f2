//! `enx get`: print one value by dotted path.

use anyhow::Result;
use enx_config::constants::PATH_SEPARATOR;
use enx_config::{ConfigTree, lookup_path, stringify_scalar};
use serde_json::Value;
use std::io::Write;

use crate::error::CliError;

/// Strings are printed raw, anything else as compact JSON.
pub fn run(config: &ConfigTree, path: &str, out: &mut impl Write) -> Result<()> {
    let value = lookup_path(config, path, PATH_SEPARATOR)
        .ok_or_else(|| CliError::PathNotFound(path.to_string()))?;

    let rendered = match value {
        Value::Object(_) | Value::Array(_) => value.to_string(),
        scalar => stringify_scalar(scalar),
    };
    writeln!(out, "{rendered}")?;
    Ok(())
}
