//! Recovery layer for running operator-configured commands.
//!
//! This module provides:
//! - Single-command execution ([`CommandRunner`], [`ShellRunner`])
//! - Batch execution with per-command outcomes ([`Recovery`], [`RecoveryExecutor`])
//! - Error handling ([`RecoveryError`])

mod error;
mod executor;

pub use error::RecoveryError;
pub use executor::{CommandRunner, Recovery, RecoveryExecutor, RecoveryOutcome, ShellRunner};
