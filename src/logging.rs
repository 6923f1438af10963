//! Logging System
//!
//! Structured logging via the `tracing` crate. Level, format, and
//! destination come from configuration with `EMBEDFS_LOG*` environment
//! overrides on top.

use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is file; None means the platform default
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_level(),
            format: default_format(),
            output: default_output(),
            file: None,
        }
    }
}

/// Default log file location under the platform state directory.
pub fn default_log_file_path() -> Result<PathBuf, GenerateError> {
    let dirs = directories::ProjectDirs::from("", "embedfs", "embedfs").ok_or_else(|| {
        GenerateError::Config("could not determine platform state directory for log file".into())
    })?;
    let dir = dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dirs.data_dir().to_path_buf());
    Ok(dir.join("embedfs.log"))
}

/// Initialize the global tracing subscriber.
///
/// Precedence, highest first: `EMBEDFS_LOG` / `EMBEDFS_LOG_FORMAT` /
/// `EMBEDFS_LOG_OUTPUT` environment variables, then the passed config,
/// then defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), GenerateError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    if !config.enabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .init();
        return Ok(());
    }

    let filter = EnvFilter::try_from_env("EMBEDFS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    let format = env_or("EMBEDFS_LOG_FORMAT", &config.format);
    let output = env_or("EMBEDFS_LOG_OUTPUT", &config.output);

    let writer = make_writer(&output, config.file.clone())?;
    let base = Registry::default().with(filter);

    match format.as_str() {
        "json" => base
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .init(),
        "text" => base
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(output != "file")
                    .with_writer(writer),
            )
            .init(),
        other => {
            return Err(GenerateError::Config(format!(
                "invalid log format: {} (must be 'json' or 'text')",
                other
            )))
        }
    }

    Ok(())
}

fn env_or(var: &str, fallback: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| fallback.to_string())
}

fn make_writer(output: &str, file: Option<PathBuf>) -> Result<BoxMakeWriter, GenerateError> {
    match output {
        "stdout" => Ok(BoxMakeWriter::new(std::io::stdout)),
        "stderr" => Ok(BoxMakeWriter::new(std::io::stderr)),
        "file" => {
            let path = match file {
                Some(p) => p,
                None => default_log_file_path()?,
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    GenerateError::Config(format!("failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    GenerateError::Config(format!("failed to open log file {:?}: {}", path, e))
                })?;
            Ok(BoxMakeWriter::new(file))
        }
        other => Err(GenerateError::Config(format!(
            "invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            other
        ))),
    }
}
