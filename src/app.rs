//! Application startup and utilities.
//!
//! This module contains exit codes and error hints that support the main
//! entry point.

use net_watchdog::config::{ConfigError, field};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Graceful shutdown after a termination signal (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - missing file, invalid values, unopenable log file.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - signal registration failure, tick task panic.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns a hint for common configuration errors, if there is one.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::NotFound { .. } => Some(
            "Copy configs/config.example.toml to ./configs/config.toml or pass --config <PATH>.",
        ),
        ConfigError::MissingRequired { field: f, .. } if *f == field::PERIOD => {
            Some("Add a line such as: period = \"30s\"")
        }
        ConfigError::TomlParse(_) => {
            Some("Keys are kebab-case, e.g. restart-commands, recovery-shell, log-level.")
        }
        _ => None,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn not_found_suggests_example_config() {
        let error = ConfigError::NotFound {
            candidates: vec![PathBuf::from("config.toml")],
        };
        assert!(config_hint(&error).unwrap().contains("config.example.toml"));
    }

    #[test]
    fn missing_period_suggests_syntax() {
        let error = ConfigError::missing(field::PERIOD, "");
        assert!(config_hint(&error).unwrap().contains("period = "));
    }

    #[test]
    fn other_errors_have_no_hint() {
        assert!(config_hint(&ConfigError::EmptyRecoveryShell).is_none());
    }
}
