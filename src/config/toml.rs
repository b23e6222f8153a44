//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde. Values are
//! kept as written; [`super::ValidatedConfig`] interprets them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from the TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Address ranges that indicate healthy connectivity
    #[serde(default)]
    pub cidrs: Vec<String>,

    /// Tick period as a duration string, e.g. "30s"
    pub period: Option<String>,

    /// Commands run, in order, when no address matches
    #[serde(default)]
    pub restart_commands: Vec<String>,

    /// Shell invocation prefix for restart commands
    pub recovery_shell: Option<Vec<String>>,

    /// Logging configuration
    #[serde(default)]
    pub logger: LoggerSection,
}

/// Logging configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LoggerSection {
    /// Minimum severity: debug, info, warn or error
    pub log_level: Option<String>,

    /// Line format: json or text
    pub log_format: Option<String>,

    /// Rotating log file; standard output when absent
    pub rotation: Option<RotationSection>,
}

/// Rotating log file section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RotationSection {
    /// Active log file path
    pub filename: PathBuf,

    /// Size threshold in megabytes
    pub max_size: Option<u64>,

    /// Rotated files to keep (0 keeps all)
    #[serde(default)]
    pub max_backups: usize,

    /// Days to keep rotated files (0 keeps forever)
    #[serde(default)]
    pub max_age: u64,

    /// Compress rotated files with zstd
    #[serde(default)]
    pub compress: bool,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}
