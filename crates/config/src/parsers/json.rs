//! Structured-data (JSON) parser.

use serde_json::Value;
use std::path::Path;

use super::{json_type_name, log_parse_failure};
use crate::error::ParseError;
use crate::log::DebugLog;
use crate::tree::ConfigTree;

/// Parse a JSON file into a tree.
///
/// Returns an empty tree if the file is missing, unreadable, malformed, or
/// does not hold a top-level object.
pub fn parse_json_file(path: &Path, log: &DebugLog) -> ConfigTree {
    match parse_json_inner(path) {
        Ok(tree) => tree,
        Err(e) => {
            log_parse_failure(log, "parse_json_file", path, &e);
            ConfigTree::new()
        }
    }
}

fn parse_json_inner(path: &Path) -> Result<ConfigTree, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|source| ParseError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::NotAnObject {
            path: path.to_path_buf(),
            found: json_type_name(&other).to_string(),
        }),
    }
}
