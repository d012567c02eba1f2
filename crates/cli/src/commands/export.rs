//! `enx export`: print flattened variables as shell assignments.
//!
//! Invariants:
//! - Output is safe to `eval`: values are single-quoted and names that are not
//!   valid shell identifiers are skipped.

use anyhow::Result;
use enx_config::constants::ENV_SEPARATOR;
use enx_config::{ConfigTree, flatten, flatten_leaves};
use std::io::Write;

pub fn run(config: &ConfigTree, leaves_only: bool, out: &mut impl Write) -> Result<()> {
    let vars = if leaves_only {
        flatten_leaves(config, ENV_SEPARATOR)
    } else {
        flatten(config, ENV_SEPARATOR)
    };

    for (name, value) in &vars {
        if !is_shell_identifier(name) {
            tracing::warn!(name = %name, "Skipping variable that is not a valid shell name");
            continue;
        }
        writeln!(out, "export {name}={}", shell_quote(value))?;
    }
    Ok(())
}

fn is_shell_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
