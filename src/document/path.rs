//! Concrete node paths.
//!
//! A `NodePath` is the sequence of object keys and array indices leading from
//! the document root to a node. Containment checks compare segments, so the
//! path `ab` is never mistaken for an ancestor of `abc`.
//!
//! # Example
//!
//! ```
//! use jsonfilter::document::path::{NodePath, PathElement};
//!
//! let path = NodePath::root()
//!     .child(PathElement::Key("a".to_string()))
//!     .child(PathElement::Index(0))
//!     .child(PathElement::Key("c".to_string()));
//! assert_eq!(path.to_string(), "a[0].c");
//! ```

use std::fmt;

/// One step in a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    Key(String),
    Index(usize),
}

impl PathElement {
    /// Returns true if the key must be written in bracket form (`['k']`) to be
    /// read back as a single segment.
    fn needs_brackets(key: &str) -> bool {
        key.is_empty()
            || !key
                .chars()
                .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '-')
    }
}

/// The location of a node relative to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    elements: Vec<PathElement>,
}

impl NodePath {
    /// The path of the root node.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns a new path one level below this one.
    pub fn child(&self, element: PathElement) -> NodePath {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend_from_slice(&self.elements);
        elements.push(element);
        NodePath { elements }
    }

    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    pub fn pop(&mut self) -> Option<PathElement> {
        self.elements.pop()
    }

    /// Splits the path into its parent path and final element.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, &PathElement)> {
        let (last, parent) = self.elements.split_last()?;
        Some((NodePath::new(parent.to_vec()), last))
    }

    /// Returns true if `self` equals `other` or lies on the way to it.
    pub fn is_prefix_of(&self, other: &NodePath) -> bool {
        other.elements.starts_with(&self.elements)
    }

    /// Returns true if `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self.elements.len() < other.elements.len() && self.is_prefix_of(other)
    }
}

impl From<Vec<PathElement>> for NodePath {
    fn from(elements: Vec<PathElement>) -> Self {
        NodePath::new(elements)
    }
}

impl fmt::Display for NodePath {
    /// Writes the canonical path string: keys joined by `.`, indices as
    /// `[n]`, keys with special characters as `['...']`. The root is "".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, element) in self.elements.iter().enumerate() {
            match element {
                PathElement::Index(idx) => write!(f, "[{}]", idx)?,
                PathElement::Key(key) if PathElement::needs_brackets(key) => {
                    f.write_str("['")?;
                    for ch in key.chars() {
                        if ch == '\'' || ch == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", ch)?;
                    }
                    f.write_str("']")?;
                }
                PathElement::Key(key) => {
                    if pos > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}
