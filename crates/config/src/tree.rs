//! Configuration tree types.
//!
//! Invariants:
//! - A `ConfigTree` is always a JSON object; scalars only appear as values.
//! - Trees are built fresh from parsed input and never share structure.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Nested key/value configuration.
pub type ConfigTree = Map<String, Value>;

/// Joined path names mapped to stringified values.
pub type FlatMap = BTreeMap<String, String>;

/// Render a value the way it should appear in an environment variable.
///
/// Strings are emitted raw, everything else as compact JSON text
/// (`true`, `42`, `null`, `{"a":1}`).
pub fn stringify_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Look up a value by a `separator`-joined path.
///
/// Array elements are addressed by their index. An empty path is never found.
pub fn lookup_path<'a>(tree: &'a ConfigTree, path: &str, separator: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut segments = path.split(separator);
    let first = segments.next()?;
    let mut current = tree.get(first)?;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}
