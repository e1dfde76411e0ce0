//! jsonfilter - prune a JSON document down to the parts matching a set of
//! path selectors.
//!
//! The document is parsed into a [`document::tree::JsonTree`], every selector
//! is resolved against the untouched tree to a set of concrete paths, and then
//! every node that is neither a match, an ancestor of a match, nor a
//! descendant of a match is detached.
//!
//! ```
//! use jsonfilter::filter::filter_json;
//!
//! let out = filter_json(r#"{"a":{"x":1,"y":2},"b":3}"#, &["a.x"]).unwrap();
//! let value: serde_json::Value = serde_json::from_str(&out).unwrap();
//! assert_eq!(value, serde_json::json!({"a": {"x": 1}}));
//! ```

pub mod cancel;
pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod filter;
pub mod jsonpath;
pub mod pipeline;

pub use cancel::CancellationToken;
pub use error::{ErrorKind, FilterError};
pub use filter::filter_json;
pub use pipeline::filter_stream;
