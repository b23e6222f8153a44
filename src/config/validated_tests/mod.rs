//! Tests for validated configuration.

use std::path::Path;
use std::time::Duration;

use super::ConfigError;
use super::cli::Cli;
use super::toml::FileConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["net-watchdog"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse and validate a TOML document
fn validate(content: &str) -> Result<ValidatedConfig, ConfigError> {
    let file = FileConfig::parse(content).unwrap();
    ValidatedConfig::from_file(&file, Path::new("test.toml"))
}

mod loading_tests;
