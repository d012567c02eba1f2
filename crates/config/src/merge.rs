//! Deep merge of configuration trees.
//!
//! The result matches flattening both trees to dotted leaf paths, overlaying
//! the override's paths onto the base's, and rebuilding the nesting:
//! - paths present on one side only survive unchanged;
//! - a path present on both sides takes the override's value;
//! - when the sides disagree on scalar vs subtree, the override's shape wins;
//! - arrays are leaves and are replaced wholesale.

use serde_json::Value;

use crate::tree::ConfigTree;

/// Merge `overlay` on top of `base`, returning a new tree.
pub fn merge(base: &ConfigTree, overlay: &ConfigTree) -> ConfigTree {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay);
    merged
}

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut ConfigTree, overlay: &ConfigTree) {
    for (key, value) in overlay {
        match base.get_mut(key) {
            Some(existing) => merge_values(existing, value),
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_into(base_map, overlay_map);
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}
