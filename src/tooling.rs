//! Tooling Layer
//!
//! Command-line entry points over the generation pipeline. The CLI only
//! layers configuration and formatting on top of the core; walk, encode,
//! and assemble semantics live in `generate`.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
