//! Error type shared by the library and the binary.

use std::string::FromUtf8Error;

use thiserror::Error;

use crate::jsonpath::JsonPathError;

/// Coarse error category, used by the binary to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    MalformedInput,
    Cancelled,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::MalformedInput => "MalformedInput",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Unknown => "UnknownError",
        }
    }
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed JSON input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("input is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] FromUtf8Error),

    #[error("invalid selector '{selector}': {source}")]
    Selector {
        selector: String,
        #[source]
        source: JsonPathError,
    },

    #[error("operation was cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            FilterError::MalformedInput(_) | FilterError::InvalidEncoding(_) => {
                ErrorKind::MalformedInput
            }
            FilterError::Cancelled => ErrorKind::Cancelled,
            FilterError::Selector { .. } | FilterError::Io(_) | FilterError::Internal(_) => {
                ErrorKind::Unknown
            }
        }
    }

    /// Structured auxiliary data for error reports, as `(key, value)` pairs.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            FilterError::MalformedInput(err) => vec![
                ("line", err.line().to_string()),
                ("column", err.column().to_string()),
            ],
            FilterError::InvalidEncoding(err) => {
                vec![("valid_up_to", err.utf8_error().valid_up_to().to_string())]
            }
            FilterError::Selector { selector, source } => {
                let mut details = vec![("selector", selector.clone())];
                if let Some(position) = source.position() {
                    details.push(("position", position.to_string()));
                }
                details
            }
            FilterError::Io(err) => vec![("io_kind", format!("{:?}", err.kind()))],
            _ => Vec::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }
}
