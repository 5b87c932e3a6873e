//! Plain-data transformer
//!
//! Serializes a result tree into a plain JSON mapping for downstream
//! consumers that want data, not nodes. Element nodes become objects
//! keyed by child tag name, repeated sibling names collect into arrays,
//! and leaf nodes become their scalar value (string, number, or null).

use serde_json::{Map, Value};

use crate::tree::node::{ScalarValue, TreeNode};

/// Convert a tree into its plain-data mapping, keyed by the root's name.
pub fn to_plain(root: &TreeNode) -> Value {
    let mut out = Map::with_capacity(1);
    out.insert(root.name.clone(), node_value(root));
    Value::Object(out)
}

fn node_value(node: &TreeNode) -> Value {
    if node.children.is_empty() {
        return scalar_value(node.value.as_ref());
    }

    let mut out = Map::with_capacity(node.children.len());
    for child in &node.children {
        let value = node_value(child);
        match out.get_mut(&child.name) {
            // Repeated sibling name: fold into an array in document order.
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                out.insert(child.name.clone(), value);
            }
        }
    }
    Value::Object(out)
}

fn scalar_value(value: Option<&ScalarValue>) -> Value {
    match value {
        Some(ScalarValue::Text(s)) => Value::String(s.clone()),
        Some(ScalarValue::Number(n)) => serde_json::json!(n),
        None => Value::Null,
    }
}
