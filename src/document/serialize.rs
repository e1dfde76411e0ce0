//! Serialization of a `JsonNode` back to JSON text.
//!
//! Output is two-space indented, with `{}` and `[]` for empty containers.
//! Numbers are written with their original source text.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::node::{JsonNode, JsonValue};

impl Serialize for JsonNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Boolean(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => n.serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            JsonValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Serializes `node` to indented JSON text.
pub fn serialize(node: &JsonNode) -> String {
    // Writing into a Vec with string keys cannot fail.
    serde_json::to_string_pretty(node).unwrap_or_default()
}

/// Serializes `node` to single-line JSON text.
pub fn serialize_compact(node: &JsonNode) -> String {
    serde_json::to_string(node).unwrap_or_default()
}
