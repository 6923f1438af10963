//! Error types for generation and the embedded runtime.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating an artifact.
///
/// Every variant is fatal to the run: generation aborts immediately and no
/// partial artifact is written.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Reading the source tree failed (stat, listing, or content read).
    #[error("failed to read source node {path}: {source}")]
    Source {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The byte encoder hit a write failure mid-stream.
    #[error("failed to encode content of {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the finished artifact to disk failed.
    #[error("failed to write artifact {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured constructor name is not a valid Rust identifier.
    #[error("invalid constructor identifier {0:?}")]
    InvalidIdentifier(String),

    /// Configuration loading or validation failed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors returned by the embedded filesystem runtime.
#[derive(Debug, Error)]
pub enum FsError {
    /// No node exists at the (normalized) path.
    #[error("open {0}: file does not exist")]
    NotFound(String),

    /// The operation is not valid for the handle's node kind,
    /// or an unsupported seek was requested.
    #[error("cannot {op} {path}")]
    InvalidOperation { op: &'static str, path: String },

    /// The registry is internally inconsistent. Indicates a corrupt
    /// artifact; reported to the caller rather than aborting.
    #[error("corrupt embedded filesystem: {0}")]
    UnexpectedState(String),
}

impl FsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}
