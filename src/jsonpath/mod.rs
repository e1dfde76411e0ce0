//! Selector parsing and evaluation.
//!
//! Selectors are JSONPath-style expressions. The leading `$` is optional, so
//! plain paths such as `a.b[0].c` are valid selectors.
//!
//! # Supported Syntax
//!
//! - `$` - Root node (optional)
//! - `.property` / `['property']` - Named property access
//! - `[index]` - Array index (supports negative indices)
//! - `[0,2]` - Multiple indices
//! - `[*]` or `.*` - All children (wildcard)
//! - `..property`, `..*`, `..[...]` - Recursive descent
//! - `[start:end]`, `[start:end:step]` - Array slicing
//! - `['prop1','prop2']` - Multiple properties
//! - `[?(@.price < 10 && @.tag)]` - Filters
//!
//! # Examples
//!
//! ```
//! use jsonfilter::document::parser::parse_json;
//! use jsonfilter::jsonpath::{Evaluator, Parser};
//!
//! let tree = parse_json(r#"{"store": {"book": [{"price": 8}, {"price": 22}]}}"#).unwrap();
//! let query = Parser::parse("store.book[?(@.price < 10)].price").unwrap();
//! let paths = Evaluator::new(tree.root()).evaluate_paths(&query);
//! assert_eq!(paths[0].to_string(), "store.book[0].price");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use ast::{JsonPath, PathSegment};
pub use error::JsonPathError;
pub use evaluator::Evaluator;
pub use parser::Parser;
