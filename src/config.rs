//! Generator configuration.
//!
//! Layered loading in the usual precedence order: defaults, then an
//! optional `embedfs.toml`, then `EMBEDFS__`-prefixed environment
//! variables. CLI flags are merged on top by the tooling layer.

use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Generator configuration surface. Everything here affects emitted
/// boilerplate or observability, never walk/encode/assemble semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedfsConfig {
    /// Source tree root to embed.
    #[serde(default)]
    pub source: Option<PathBuf>,

    /// Destination path of the generated artifact.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Constructor function name in the artifact.
    #[serde(default)]
    pub name: Option<String>,

    /// Raw `#[cfg(...)]` attribute content for the constructor.
    #[serde(default)]
    pub cfg: Option<String>,

    /// Doc comment for the constructor.
    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, optionally from an explicit file.
    ///
    /// Without an explicit path, `embedfs.toml` in the working directory
    /// is used when present. The environment overlay always applies.
    pub fn load(explicit: Option<&Path>) -> Result<EmbedfsConfig, ConfigError> {
        let builder = Config::builder();
        let builder = match explicit {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder.add_source(File::with_name("embedfs").required(false)),
        };
        let builder = builder.add_source(
            Environment::with_prefix("EMBEDFS")
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }
}
