//! CLI Tooling
//!
//! Command-line interface for artifact generation. Flags override file
//! and environment configuration; every command returns its output as a
//! string so it can be asserted on directly in tests.

use crate::config::{ConfigLoader, EmbedfsConfig};
use crate::error::GenerateError;
use crate::generate::{generate, Options};
use crate::logging::LoggingConfig;
use crate::source::{join, OsFs, SourceFs};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Embedfs CLI - compile a file tree into an embedded filesystem artifact
#[derive(Parser)]
#[command(name = "embedfs")]
#[command(about = "Compile a file tree into a read-only embedded filesystem artifact")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk a source directory and write the generated artifact
    Generate {
        /// Source directory to embed
        #[arg(long)]
        source: Option<PathBuf>,

        /// Destination path of the generated .rs file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Constructor function name in the artifact
        #[arg(long)]
        name: Option<String>,

        /// Raw content of a #[cfg(...)] attribute on the constructor
        #[arg(long)]
        cfg: Option<String>,

        /// Doc comment for the constructor
        #[arg(long)]
        comment: Option<String>,

        /// Summary output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the manifest the walker would produce, without writing anything
    Manifest {
        /// Source directory to walk
        #[arg(long)]
        source: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// One manifest row for the `manifest` command.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub path: String,
    pub kind: &'static str,
    pub size: u64,
    pub mod_time: DateTime<Utc>,
}

/// Execution context carrying loaded configuration.
pub struct CliContext {
    config: EmbedfsConfig,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, GenerateError> {
        let config = ConfigLoader::load(config_path.as_deref())
            .map_err(|e| GenerateError::Config(e.to_string()))?;
        Ok(CliContext { config })
    }

    pub fn from_config(config: EmbedfsConfig) -> Self {
        CliContext { config }
    }

    /// Logging configuration with CLI flags merged over file/env config.
    pub fn logging_config(&self, cli: &Cli) -> LoggingConfig {
        let mut logging = self.config.logging.clone();
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }

    /// Execute a command, returning its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, GenerateError> {
        match command {
            Commands::Generate {
                source,
                output,
                name,
                cfg,
                comment,
                format,
            } => {
                let source_root = self.require_path(source.clone(), self.config.source.clone(), "source")?;
                let output_path = self.require_path(output.clone(), self.config.output.clone(), "output")?;

                let mut opts = Options::new(output_path);
                if let Some(name) = name.clone().or_else(|| self.config.name.clone()) {
                    opts.name = name;
                }
                opts.cfg = cfg.clone().or_else(|| self.config.cfg.clone());
                opts.comment = comment.clone().or_else(|| self.config.comment.clone());

                info!(source = %source_root.display(), "generating artifact");
                let report = generate(&OsFs::new(source_root), &opts)?;

                match format.as_str() {
                    "json" => to_json(&report),
                    "text" => Ok(format!(
                        "wrote {} ({} files, {} dirs, {} content bytes)",
                        report.output.display(),
                        report.files,
                        report.dirs,
                        report.content_bytes
                    )),
                    other => Err(unknown_format(other)),
                }
            }
            Commands::Manifest { source, format } => {
                let source_root = self.require_path(source.clone(), self.config.source.clone(), "source")?;
                let mut entries = Vec::new();
                collect_manifest(&OsFs::new(source_root), "/", &mut entries)?;

                match format.as_str() {
                    "json" => to_json(&entries),
                    "text" => {
                        let mut out = String::new();
                        for entry in &entries {
                            if entry.kind == "dir" {
                                out.push_str(&format!("{}/\n", entry.path.trim_end_matches('/')));
                            } else {
                                out.push_str(&format!("{}\t{}\n", entry.path, entry.size));
                            }
                        }
                        out.push_str(&format!("{} entries\n", entries.len()));
                        Ok(out)
                    }
                    other => Err(unknown_format(other)),
                }
            }
        }
    }

    fn require_path(
        &self,
        flag: Option<PathBuf>,
        configured: Option<PathBuf>,
        what: &str,
    ) -> Result<PathBuf, GenerateError> {
        flag.or(configured).ok_or_else(|| {
            GenerateError::Config(format!("{} path not set (flag or config file)", what))
        })
    }
}

/// Depth-first manifest collection in the same order the generator walks.
fn collect_manifest<S: SourceFs>(
    source: &S,
    path: &str,
    out: &mut Vec<ManifestEntry>,
) -> Result<(), GenerateError> {
    let meta = source.stat(path).map_err(|source| GenerateError::Source {
        path: path.to_string(),
        source,
    })?;

    out.push(ManifestEntry {
        path: path.to_string(),
        kind: if meta.is_dir { "dir" } else { "file" },
        size: meta.size,
        mod_time: meta.mod_time,
    });

    if meta.is_dir {
        let names = source.read_dir(path).map_err(|source| GenerateError::Source {
            path: path.to_string(),
            source,
        })?;
        let mut children: Vec<String> = names.iter().map(|n| join(path, n)).collect();
        children.sort();
        for child in &children {
            collect_manifest(source, child, out)?;
        }
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, GenerateError> {
    serde_json::to_string_pretty(value).map_err(|e| GenerateError::Config(e.to_string()))
}

fn unknown_format(format: &str) -> GenerateError {
    GenerateError::Config(format!(
        "unknown output format: {} (must be 'text' or 'json')",
        format
    ))
}
