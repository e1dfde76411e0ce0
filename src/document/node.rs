//! JSON node representation.
//!
//! Every JSON value is wrapped in a `JsonNode`. Objects keep their keys in
//! document order through `IndexMap`, and numbers are kept as
//! `serde_json::Number` so that the original numeric text (`1.0`, `1e5`,
//! `-0`) is written back exactly as it was read.
//!
//! # Example
//!
//! ```
//! use jsonfilter::document::node::{JsonNode, JsonValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), JsonNode::new(JsonValue::String("jsonfilter".to_string())));
//! map.insert("stable".to_string(), JsonNode::new(JsonValue::Boolean(false)));
//! let object = JsonNode::new(JsonValue::Object(map));
//!
//! assert!(object.value().is_object());
//! assert_eq!(object.children().len(), 2);
//! ```

use indexmap::IndexMap;
use serde_json::Number;

use super::path::PathElement;

/// A JSON value.
///
/// Objects and arrays contain `JsonNode` instances, so the whole document is a
/// single owned tree.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// A JSON object; key order is the order keys appeared in the source
    Object(IndexMap<String, JsonNode>),
    /// A JSON array
    Array(Vec<JsonNode>),
    /// A JSON string
    String(String),
    /// A JSON number, kept in its source representation
    Number(Number),
    /// A JSON boolean
    Boolean(bool),
    /// The JSON null value
    Null,
}

impl JsonValue {
    /// Returns true if this value is an object.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonfilter::document::node::JsonValue;
    /// use indexmap::IndexMap;
    ///
    /// assert!(JsonValue::Object(IndexMap::new()).is_object());
    /// assert!(!JsonValue::Null.is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this value can have children (object or array).
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    /// Short type name used in log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Null => "null",
        }
    }
}

/// A node in a JSON document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNode {
    pub(crate) value: JsonValue,
}

impl JsonNode {
    /// Creates a new node holding `value`.
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// Returns an immutable reference to the node's value.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonfilter::document::node::{JsonNode, JsonValue};
    ///
    /// let node = JsonNode::new(JsonValue::Boolean(true));
    /// assert!(matches!(node.value(), JsonValue::Boolean(true)));
    /// ```
    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    /// Returns a mutable reference to the node's value.
    pub fn value_mut(&mut self) -> &mut JsonValue {
        &mut self.value
    }

    /// Consumes the node, returning its value.
    pub fn into_value(self) -> JsonValue {
        self.value
    }

    /// Returns the direct children of this node in document order, each paired
    /// with the path element that addresses it from this node.
    ///
    /// Scalars have no children.
    pub fn children(&self) -> Vec<(PathElement, &JsonNode)> {
        match &self.value {
            JsonValue::Object(entries) => entries
                .iter()
                .map(|(key, child)| (PathElement::Key(key.clone()), child))
                .collect(),
            JsonValue::Array(elements) => elements
                .iter()
                .enumerate()
                .map(|(idx, child)| (PathElement::Index(idx), child))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the direct child addressed by `element`, if any.
    pub fn child(&self, element: &PathElement) -> Option<&JsonNode> {
        match (&self.value, element) {
            (JsonValue::Object(entries), PathElement::Key(key)) => entries.get(key),
            (JsonValue::Array(elements), PathElement::Index(idx)) => elements.get(*idx),
            _ => None,
        }
    }

    /// Mutable counterpart of [`JsonNode::child`].
    pub fn child_mut(&mut self, element: &PathElement) -> Option<&mut JsonNode> {
        match (&mut self.value, element) {
            (JsonValue::Object(entries), PathElement::Key(key)) => entries.get_mut(key),
            (JsonValue::Array(elements), PathElement::Index(idx)) => elements.get_mut(*idx),
            _ => None,
        }
    }
}

impl From<JsonValue> for JsonNode {
    fn from(value: JsonValue) -> Self {
        JsonNode::new(value)
    }
}
