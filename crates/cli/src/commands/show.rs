//! `enx show`: print the merged configuration as JSON.

use anyhow::{Context, Result};
use enx_config::ConfigTree;
use std::io::Write;

pub fn run(config: &ConfigTree, compact: bool, out: &mut impl Write) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(config)
    } else {
        serde_json::to_string_pretty(config)
    }
    .context("Failed to serialize configuration")?;

    writeln!(out, "{rendered}")?;
    Ok(())
}
