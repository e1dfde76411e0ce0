//! Input and output boundaries.
//!
//! This module reads the input document from stdin or a file and writes the
//! filtered document to stdout or a file. These are the only places where the
//! pipeline waits, and both honour a cancellation token.

pub mod loader;
pub mod saver;
