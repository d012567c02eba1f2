//! Candidate file resolution.
//!
//! Responsibilities:
//! - Derive the key=value and module candidates for a logical `*.json` path.
//! - Parse the first candidate that exists, in a fixed priority order.
//!
//! Invariants:
//! - Priority: extension-stripped path (key=value), then `.js`, then `.json`.
//! - The `.json` fallback is always parsed, even when missing (it yields an
//!   empty tree).

use std::path::{Path, PathBuf};

use crate::constants::{JSON_EXTENSION, MODULE_EXTENSION};
use crate::error::ConfigError;
use crate::parsers::{ParseContext, parse_config_file};
use crate::tree::ConfigTree;

/// Alternate candidates for a path ending in `.json`.
///
/// Returns `(stripped, module)`, e.g. `.env` and `.env.js` for `.env.json`,
/// or `None` when the path does not end in `.json`.
pub fn candidate_paths(json_path: &Path) -> Option<(PathBuf, PathBuf)> {
    let raw = json_path.to_str()?;
    let stem = raw.strip_suffix(JSON_EXTENSION)?;

    Some((
        PathBuf::from(stem),
        PathBuf::from(format!("{stem}{MODULE_EXTENSION}")),
    ))
}

/// Parse the highest-priority existing variant of `json_path`.
///
/// # Errors
///
/// Returns `ConfigError::UnsupportedFileType` when the chosen file name maps
/// to no known format.
pub fn resolve_and_parse(json_path: &Path, ctx: &ParseContext) -> Result<ConfigTree, ConfigError> {
    let Some((stripped, module)) = candidate_paths(json_path) else {
        return parse_config_file(json_path, ctx);
    };

    let chosen = if stripped.exists() {
        stripped
    } else if module.exists() {
        module
    } else {
        json_path.to_path_buf()
    };

    ctx.log.log("resolve_and_parse", chosen.display());
    parse_config_file(&chosen, ctx)
}
