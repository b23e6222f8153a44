//! Configuration layer.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - TOML configuration file parsing ([`FileConfig`])
//! - Duration strings ([`parse_duration`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Default values ([`defaults`])
//!
//! # Lookup
//!
//! The CLI only selects the file. Every setting lives in the file, which is
//! the first existing path among the `--config` value (default
//! `./configs/config.toml`) and `config.toml`. Unknown keys are rejected.

mod cli;
pub mod defaults;
mod duration;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::Cli;
pub use duration::{DurationError, parse_duration};
pub use error::{ConfigError, field};
pub use toml::{FileConfig, LoggerSection, RotationSection};
pub use validated::ValidatedConfig;
