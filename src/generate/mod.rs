//! Artifact generation pipeline.
//!
//! `generate` drives the linear walk → encode → assemble pipeline over a
//! source filesystem and writes the finished artifact wholesale. Assembly
//! happens in memory; the destination file is only touched after every
//! node has been recorded successfully, so a failed run never leaves a
//! truncated artifact behind.

pub mod assembler;
pub mod bytes;
pub mod walker;

use crate::error::GenerateError;
use crate::source::SourceFs;
use assembler::Assembler;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Generation options. Only the boilerplate of the emitted source is
/// affected by these; walk, encode, and assemble semantics never are.
#[derive(Debug, Clone)]
pub struct Options {
    /// Destination path of the generated `.rs` file.
    pub output: PathBuf,
    /// Constructor function name inside the artifact.
    pub name: String,
    /// Raw content of an optional `#[cfg(...)]` attribute on the
    /// constructor.
    pub cfg: Option<String>,
    /// Doc comment placed on the constructor.
    pub comment: Option<String>,
}

impl Options {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Options {
            output: output.into(),
            name: "assets".to_string(),
            cfg: None,
            comment: None,
        }
    }

    fn comment_or_default(&self) -> String {
        match &self.comment {
            Some(c) => c.clone(),
            None => format!("{}() reconstructs the embedded file tree.", self.name),
        }
    }
}

/// Summary of a completed generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub files: usize,
    pub dirs: usize,
    pub content_bytes: u64,
    pub artifact_bytes: u64,
}

/// Generate a source artifact that statically implements `source`.
pub fn generate<S: SourceFs>(source: &S, opts: &Options) -> Result<GenerateReport, GenerateError> {
    if !is_valid_identifier(&opts.name) {
        return Err(GenerateError::InvalidIdentifier(opts.name.clone()));
    }

    let mut asm = Assembler::new();
    asm.header(&opts.name, opts.cfg.as_deref(), &opts.comment_or_default())
        .map_err(|source| GenerateError::Encode {
            path: "/".to_string(),
            source,
        })?;

    walker::walk(source, &mut asm)?;

    let (buf, stats) = asm.finish().map_err(|source| GenerateError::Encode {
        path: "/".to_string(),
        source,
    })?;

    let artifact_bytes = buf.len() as u64;
    fs::write(&opts.output, &buf).map_err(|source| GenerateError::WriteOutput {
        path: opts.output.clone(),
        source,
    })?;

    info!(
        output = %opts.output.display(),
        files = stats.files,
        dirs = stats.dirs,
        content_bytes = stats.content_bytes,
        artifact_bytes,
        "wrote artifact"
    );

    Ok(GenerateReport {
        output: opts.output.clone(),
        files: stats.files,
        dirs: stats.dirs,
        content_bytes: stats.content_bytes,
        artifact_bytes,
    })
}

/// Keywords that would otherwise pass the character check below.
const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let leading_ok = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic());
    leading_ok
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && name != "_"
        && !RESERVED.contains(&name)
}
