//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::network::RangeError;

/// Error type for configuration operations.
///
/// Every variant is fatal at startup, before the timer is armed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No candidate path holds a config file.
    #[error("Config file not found, tried: {}", display_paths(.candidates))]
    NotFound {
        /// Paths that were tried, in order
        candidates: Vec<PathBuf>,
    },

    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid duration value (malformed or zero).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A configured address range is malformed.
    #[error("{0}")]
    InvalidRange(#[from] RangeError),

    /// Invalid log level value.
    #[error("Invalid log level '{value}': expected debug, info, warn, or error")]
    InvalidLogLevel {
        /// The invalid value provided
        value: String,
    },

    /// Invalid log format value.
    #[error("Invalid log format '{value}': expected json or text")]
    InvalidLogFormat {
        /// The invalid value provided
        value: String,
    },

    /// Invalid log rotation settings.
    #[error("Invalid log rotation configuration: {0}")]
    InvalidRotation(String),

    /// `recovery-shell` is an empty array.
    #[error("Invalid recovery-shell: expected at least the shell program, e.g. [\"sudo\", \"bash\", \"-c\"]")]
    EmptyRecoveryShell,
}

/// Well-known field names for `MissingRequired` and `InvalidDuration` errors.
pub mod field {
    /// The tick period.
    pub const PERIOD: &str = "period";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_every_candidate() {
        let error = ConfigError::NotFound {
            candidates: vec![
                PathBuf::from("./configs/config.toml"),
                PathBuf::from("config.toml"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Config file not found, tried: './configs/config.toml', 'config.toml'"
        );
    }

    #[test]
    fn missing_helper_builds_variant() {
        let error = ConfigError::missing(field::PERIOD, "Set period in config file");
        assert_eq!(
            error.to_string(),
            "Missing required field: period. Set period in config file"
        );
    }

    #[test]
    fn invalid_range_shows_range_message() {
        let source = crate::network::AddressRange::parse("10.0.0.0/99").unwrap_err();
        let error = ConfigError::from(source);
        assert!(error.to_string().contains("10.0.0.0/99"));
    }
}
