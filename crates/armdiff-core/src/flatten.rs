//! Flatten nested JSON into leaf path → scalar value pairs.
//!
//! Object fields extend the path as `.field` (no leading dot at the root),
//! array elements as `[index]`. Only leaves are emitted: an empty object or
//! array contributes nothing.

use serde_json::Value;
use std::collections::BTreeMap;

/// Flat view of one resource, keyed by property path.
pub type FlatProperties = BTreeMap<String, Value>;

/// Flatten `value` into a map of every leaf's full path to its value.
///
/// A scalar at the root maps to the empty path.
pub fn flatten(value: &Value) -> FlatProperties {
    let mut out = FlatProperties::new();
    flatten_into(value, String::new(), &mut out);
    out
}

fn flatten_into(value: &Value, path: String, out: &mut FlatProperties) {
    match value {
        Value::Object(fields) => {
            for (field, child) in fields {
                let child_path = if path.is_empty() {
                    field.clone()
                } else {
                    format!("{}.{}", path, field)
                };
                flatten_into(child, child_path, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, format!("{}[{}]", path, index), out);
            }
        }
        leaf => {
            out.insert(path, leaf.clone());
        }
    }
}
