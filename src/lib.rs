//! Embedfs: Compiled Embedded Filesystems
//!
//! Converts a file tree into a generated source artifact that rebuilds
//! the tree as an immutable in-memory filesystem, with no access to the
//! original storage at runtime.

pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod runtime;
pub mod source;
pub mod tooling;
