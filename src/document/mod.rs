//! In-memory JSON document model.
//!
//! Parsing produces a [`tree::JsonTree`] of [`node::JsonNode`] values. Nodes
//! are addressed by [`path::NodePath`], a sequence of object keys and array
//! indices computed from a node's position, never stored on the node.

pub mod node;
pub mod parser;
pub mod path;
pub mod serialize;
pub mod tree;
