//! Error types for selector parsing.

use thiserror::Error;

/// Errors that can occur while parsing a selector expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonPathError {
    #[error("unexpected '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },

    #[error("selector ended early, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("{message}")]
    InvalidSyntax { message: String },
}

impl JsonPathError {
    /// Character offset of the error, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            JsonPathError::UnexpectedToken { position, .. } => Some(*position),
            _ => None,
        }
    }
}
