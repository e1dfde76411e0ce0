//! Path-addressed navigation and mutation of a JSON document.
//!
//! # Example
//!
//! ```
//! use jsonfilter::document::parser::parse_json;
//! use jsonfilter::document::path::{NodePath, PathElement};
//!
//! let mut tree = parse_json(r#"{"items": [1, 2, 3]}"#).unwrap();
//! let second = NodePath::new(vec![
//!     PathElement::Key("items".to_string()),
//!     PathElement::Index(1),
//! ]);
//!
//! tree.detach(&second).unwrap();
//! assert_eq!(tree.paths().len(), 3); // items, items[0], items[1]
//! ```

use anyhow::{anyhow, Result};

use super::node::{JsonNode, JsonValue};
use super::path::{NodePath, PathElement};

/// A complete JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonTree {
    root: JsonNode,
}

impl JsonTree {
    /// Creates a new tree with the given root node.
    pub fn new(root: JsonNode) -> Self {
        Self { root }
    }

    /// Returns a reference to the root node of the tree.
    pub fn root(&self) -> &JsonNode {
        &self.root
    }

    /// Returns a mutable reference to the root node of the tree.
    pub fn root_mut(&mut self) -> &mut JsonNode {
        &mut self.root
    }

    /// Consumes the tree, returning the root node.
    pub fn into_root(self) -> JsonNode {
        self.root
    }

    /// Gets the node at `path`.
    ///
    /// Returns `None` if any segment does not exist or tries to step into a
    /// scalar, or if a key is used on an array (and vice versa).
    pub fn get_node(&self, path: &NodePath) -> Option<&JsonNode> {
        let mut current = &self.root;
        for element in path.elements() {
            current = current.child(element)?;
        }
        Some(current)
    }

    /// Gets a mutable reference to the node at `path`.
    pub fn get_node_mut(&mut self, path: &NodePath) -> Option<&mut JsonNode> {
        let mut current = &mut self.root;
        for element in path.elements() {
            current = current.child_mut(element)?;
        }
        Some(current)
    }

    /// Removes the node at `path` from its parent and returns it.
    ///
    /// Object entries are removed with their key, keeping the order of the
    /// remaining keys. Array elements after the removed one shift down by one.
    /// The root cannot be detached.
    pub fn detach(&mut self, path: &NodePath) -> Result<JsonNode> {
        let (parent_path, element) = path
            .split_last()
            .ok_or_else(|| anyhow!("Cannot detach root node"))?;

        let parent = self
            .get_node_mut(&parent_path)
            .ok_or_else(|| anyhow!("Parent node not found for path '{}'", path))?;

        match (parent.value_mut(), element) {
            (JsonValue::Object(entries), PathElement::Key(key)) => entries
                .shift_remove(key)
                .ok_or_else(|| anyhow!("Key '{}' not found at '{}'", key, parent_path)),
            (JsonValue::Array(elements), PathElement::Index(idx)) => {
                if *idx >= elements.len() {
                    return Err(anyhow!(
                        "Index {} out of bounds for array with {} elements",
                        idx,
                        elements.len()
                    ));
                }
                Ok(elements.remove(*idx))
            }
            (value, _) => Err(anyhow!(
                "Cannot detach '{}' from a {} parent",
                path,
                value.type_name()
            )),
        }
    }

    /// Returns the path of every non-root node in pre-order (document order).
    pub fn paths(&self) -> Vec<NodePath> {
        fn walk(node: &JsonNode, current: &mut NodePath, out: &mut Vec<NodePath>) {
            for (element, child) in node.children() {
                current.push(element);
                out.push(current.clone());
                walk(child, current, out);
                current.pop();
            }
        }

        let mut out = Vec::new();
        walk(&self.root, &mut NodePath::root(), &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;

    fn key(k: &str) -> PathElement {
        PathElement::Key(k.to_string())
    }

    #[test]
    fn test_get_node_nested() {
        let tree = parse_json(r#"{"a": [{"x": true}]}"#).unwrap();
        let path = NodePath::new(vec![key("a"), PathElement::Index(0), key("x")]);
        assert_eq!(
            tree.get_node(&path).unwrap().value(),
            &JsonValue::Boolean(true)
        );
        assert!(tree.get_node(&NodePath::root()).is_some());
    }

    #[test]
    fn test_get_node_invalid_path() {
        let tree = parse_json(r#"{"a": [1]}"#).unwrap();
        assert!(tree
            .get_node(&NodePath::new(vec![key("a"), PathElement::Index(5)]))
            .is_none());
        assert!(tree
            .get_node(&NodePath::new(vec![key("a"), key("b")]))
            .is_none());
    }

    #[test]
    fn test_detach_object_entry_keeps_order() {
        let mut tree = parse_json(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
        tree.detach(&NodePath::new(vec![key("b")])).unwrap();
        let keys: Vec<String> = tree.paths().iter().map(|p| p.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_detach_array_element_shifts() {
        let mut tree = parse_json("[10, 20, 30]").unwrap();
        let removed = tree.detach(&NodePath::new(vec![PathElement::Index(0)])).unwrap();
        assert_eq!(removed.value(), &JsonValue::Number(10.into()));
        let first = tree.get_node(&NodePath::new(vec![PathElement::Index(0)])).unwrap();
        assert_eq!(first.value(), &JsonValue::Number(20.into()));
    }

    #[test]
    fn test_detach_root_fails() {
        let mut tree = parse_json("{}").unwrap();
        assert!(tree.detach(&NodePath::root()).is_err());
    }

    #[test]
    fn test_detach_missing_fails() {
        let mut tree = parse_json(r#"{"a": [1]}"#).unwrap();
        assert!(tree.detach(&NodePath::new(vec![key("z")])).is_err());
        assert!(tree
            .detach(&NodePath::new(vec![key("a"), PathElement::Index(1)]))
            .is_err());
        assert!(tree
            .detach(&NodePath::new(vec![PathElement::Index(0)]))
            .is_err());
    }

    #[test]
    fn test_paths_pre_order() {
        let tree = parse_json(r#"{"a": {"b": [1, 2]}, "c": null}"#).unwrap();
        let paths: Vec<String> = tree.paths().iter().map(|p| p.to_string()).collect();
        assert_eq!(paths, vec!["a", "a.b", "a.b[0]", "a.b[1]", "c"]);
    }
}
