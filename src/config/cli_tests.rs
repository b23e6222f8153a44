//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::Cli;
use super::defaults;

#[test]
fn config_defaults_to_configs_directory() {
    let cli = Cli::parse_from_iter(["net-watchdog"]);
    assert_eq!(cli.config, PathBuf::from(defaults::CONFIG_PATH));
}

#[test]
fn long_config_flag() {
    let cli = Cli::parse_from_iter(["net-watchdog", "--config", "/etc/net-watchdog.toml"]);
    assert_eq!(cli.config, PathBuf::from("/etc/net-watchdog.toml"));
}

#[test]
fn short_config_flag() {
    let cli = Cli::parse_from_iter(["net-watchdog", "-c", "local.toml"]);
    assert_eq!(cli.config, PathBuf::from("local.toml"));
}

#[test]
fn unknown_flag_is_rejected() {
    let result = Cli::try_parse_from_iter(["net-watchdog", "--verbose"]);
    assert!(result.is_err());
}

#[test]
fn subcommands_are_rejected() {
    let result = Cli::try_parse_from_iter(["net-watchdog", "init"]);
    assert!(result.is_err());
}

#[test]
fn config_flag_requires_value() {
    let result = Cli::try_parse_from_iter(["net-watchdog", "--config"]);
    assert!(result.is_err());
}
