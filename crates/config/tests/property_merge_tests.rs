//! Property-based tests for merging and flattening.
//!
//! These tests verify the merge engine against its flat-path definition using
//! randomly generated trees:
//! - Disjoint leaf paths: the merge is the union of both trees.
//! - Shared leaf paths: the override's value wins.
//! - Merging agrees with overlaying the flattened leaf maps.

use enx_config::{ConfigTree, flatten_leaves, merge, unflatten};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for keys that never contain the path separator.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}"
}

/// Strategy for scalar leaves of every JSON type.
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,10}".prop_map(Value::String),
    ]
}

/// Strategy for trees with non-empty nested objects.
fn tree_strategy() -> impl Strategy<Value = ConfigTree> {
    let value = scalar_strategy().prop_recursive(3, 32, 4, |inner| {
        prop::collection::btree_map(key_strategy(), inner, 1..4)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    });
    prop::collection::btree_map(key_strategy(), value, 0..5).prop_map(|m| m.into_iter().collect())
}

/// Prefix every top-level key so two trees share no path.
fn prefixed(tree: ConfigTree, prefix: &str) -> ConfigTree {
    tree.into_iter()
        .map(|(k, v)| (format!("{prefix}{k}"), v))
        .collect()
}

/// Stringify every leaf so a tree can be compared with an unflattened one.
fn stringly(tree: &ConfigTree) -> ConfigTree {
    let leaves = flatten_leaves(tree, ".");
    unflatten(&leaves, ".")
}

proptest! {
    #[test]
    fn prop_disjoint_merge_is_union(base in tree_strategy(), overlay in tree_strategy()) {
        let base = prefixed(base, "b");
        let overlay = prefixed(overlay, "o");

        let merged = merge(&base, &overlay);

        prop_assert_eq!(merged.len(), base.len() + overlay.len());
        for (key, value) in base.iter().chain(overlay.iter()) {
            prop_assert_eq!(merged.get(key), Some(value));
        }
    }

    #[test]
    fn prop_shared_leaf_takes_override(tree in tree_strategy(), replacement in scalar_strategy()) {
        let leaves = flatten_leaves(&tree, ".");
        prop_assume!(!leaves.is_empty());

        for path in leaves.keys() {
            let segments: Vec<&str> = path.split('.').collect();
            let mut node = Value::Object(ConfigTree::new());
            // Build {seg0: {seg1: ... replacement}}.
            let mut current = &mut node;
            for (idx, segment) in segments.iter().enumerate() {
                let Value::Object(map) = current else { unreachable!() };
                let next = if idx + 1 == segments.len() {
                    replacement.clone()
                } else {
                    Value::Object(ConfigTree::new())
                };
                current = map.entry(segment.to_string()).or_insert(next);
            }
            let Value::Object(overlay) = node else { unreachable!() };

            let merged = merge(&tree, &overlay);
            let merged_leaves = flatten_leaves(&merged, ".");

            prop_assert_eq!(
                merged_leaves.get(path),
                Some(&enx_config::stringify_scalar(&replacement))
            );
            prop_assert_eq!(merged_leaves.len(), leaves.len());
        }
    }

    #[test]
    fn prop_merge_matches_flat_overlay(base in tree_strategy(), overlay in tree_strategy()) {
        let base_leaves = flatten_leaves(&base, ".");
        let overlay_leaves = flatten_leaves(&overlay, ".");

        // Only compare when no path is a leaf on one side and a subtree on the other.
        let conflicting = base_leaves.keys().any(|b| {
            overlay_leaves
                .keys()
                .any(|o| b.starts_with(&format!("{o}.")) || o.starts_with(&format!("{b}.")))
        });
        prop_assume!(!conflicting);

        let mut overlaid = base_leaves.clone();
        overlaid.extend(overlay_leaves);

        prop_assert_eq!(stringly(&merge(&base, &overlay)), unflatten(&overlaid, "."));
    }
}
