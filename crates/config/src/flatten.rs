//! Flattening trees into environment-variable style names, and back.
//!
//! Responsibilities:
//! - Flatten a nested tree into joined path names with stringified values,
//!   including an aggregate JSON entry for every subtree.
//! - Rebuild a nested tree from joined names, e.g. from live environment variables.
//!
//! Invariants:
//! - `unflatten(flatten(t, sep), sep) == t` for trees whose leaves are strings,
//!   whose objects are non-empty, and whose keys do not contain `sep`.
//! - When rebuilding, a subtree always wins over a scalar at the same path, so
//!   aggregate JSON entries never shadow their own leaves.

use serde_json::Value;

use crate::constants::ENV_SEPARATOR;
use crate::env::EnvProvider;
use crate::tree::{ConfigTree, FlatMap, stringify_scalar};

/// Flatten `tree`, joining path segments with `separator`.
///
/// Scalars map to their stringified value. Objects and arrays map to their
/// compact JSON and are also walked, arrays using element indexes as segments.
pub fn flatten(tree: &ConfigTree, separator: &str) -> FlatMap {
    let mut flat = FlatMap::new();
    for (key, value) in tree {
        flatten_value(key.clone(), value, separator, true, &mut flat);
    }
    flat
}

/// Flatten `tree` emitting leaves only, without aggregate subtree entries.
pub fn flatten_leaves(tree: &ConfigTree, separator: &str) -> FlatMap {
    let mut flat = FlatMap::new();
    for (key, value) in tree {
        flatten_value(key.clone(), value, separator, false, &mut flat);
    }
    flat
}

fn flatten_value(
    name: String,
    value: &Value,
    separator: &str,
    aggregates: bool,
    flat: &mut FlatMap,
) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_value(
                    format!("{name}{separator}{key}"),
                    child,
                    separator,
                    aggregates,
                    flat,
                );
            }
            if aggregates {
                flat.insert(name, value.to_string());
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                flatten_value(
                    format!("{name}{separator}{idx}"),
                    child,
                    separator,
                    aggregates,
                    flat,
                );
            }
            if aggregates {
                flat.insert(name, value.to_string());
            }
        }
        scalar => {
            flat.insert(name, stringify_scalar(scalar));
        }
    }
}

/// Rebuild a nested tree from `separator`-joined names.
///
/// Every value is kept as a string.
pub fn unflatten<'a, I>(flat: I, separator: &str) -> ConfigTree
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut entries: Vec<_> = flat.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut tree = ConfigTree::new();
    for (name, value) in entries {
        let segments: Vec<&str> = name.split(separator).collect();
        insert_path(&mut tree, &segments, value);
    }
    tree
}

fn insert_path(tree: &mut ConfigTree, segments: &[&str], value: &str) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        // An existing subtree is never replaced by a scalar.
        if !matches!(tree.get(*first), Some(Value::Object(_))) {
            tree.insert((*first).to_string(), Value::String(value.to_string()));
        }
        return;
    }

    let slot = tree
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(ConfigTree::new()));
    if !slot.is_object() {
        *slot = Value::Object(ConfigTree::new());
    }
    if let Value::Object(child) = slot {
        insert_path(child, rest, value);
    }
}

/// Rebuild a tree from the variables visible through `provider`.
///
/// With a `prefix`, only variables starting with it are used and the prefix is
/// stripped from their names (`APP_DB_HOST` with prefix `APP_` becomes
/// `{"DB": {"HOST": ...}}`).
pub fn tree_from_env(provider: &dyn EnvProvider, prefix: Option<&str>) -> ConfigTree {
    let flat: FlatMap = provider
        .vars()
        .into_iter()
        .filter_map(|(name, value)| {
            let name = match prefix {
                Some(prefix) => name.strip_prefix(prefix)?.to_string(),
                None => name,
            };
            (!name.is_empty()).then_some((name, value))
        })
        .collect();

    unflatten(&flat, ENV_SEPARATOR)
}
