//! JSON parsing into a `JsonTree`.
//!
//! Syntax checking is delegated to `serde_json`; the resulting value is then
//! converted into our own node representation. Keys keep their source order
//! and numbers keep their source text.
//!
//! # Example
//!
//! ```
//! use jsonfilter::document::parser::parse_json;
//! use jsonfilter::document::path::{NodePath, PathElement};
//!
//! let tree = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! let age = tree.get_node(&NodePath::new(vec![PathElement::Key("age".to_string())]));
//! assert!(age.is_some());
//! ```

use indexmap::IndexMap;
use serde_json::Value as SerdeValue;

use super::node::{JsonNode, JsonValue};
use super::tree::JsonTree;
use crate::error::FilterError;

/// Parses a JSON document.
///
/// Fails with [`FilterError::MalformedInput`] when `json_str` is not exactly
/// one syntactically valid JSON value. Empty or whitespace-only input is
/// malformed.
pub fn parse_json(json_str: &str) -> Result<JsonTree, FilterError> {
    let serde_value: SerdeValue =
        serde_json::from_str(json_str).map_err(FilterError::MalformedInput)?;

    Ok(JsonTree::new(parse_value(serde_value)))
}

/// Converts an already parsed `serde_json::Value` into a `JsonNode`.
pub fn parse_value(value: SerdeValue) -> JsonNode {
    let converted = match value {
        SerdeValue::Null => JsonValue::Null,
        SerdeValue::Bool(b) => JsonValue::Boolean(b),
        SerdeValue::Number(n) => JsonValue::Number(n),
        SerdeValue::String(s) => JsonValue::String(s),
        SerdeValue::Array(items) => JsonValue::Array(items.into_iter().map(parse_value).collect()),
        SerdeValue::Object(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (key, child) in map {
                entries.insert(key, parse_value(child));
            }
            JsonValue::Object(entries)
        }
    };
    JsonNode::new(converted)
}
