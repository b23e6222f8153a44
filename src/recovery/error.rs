//! Error types for recovery commands.

use std::process::ExitStatus;

use thiserror::Error;

/// A single recovery command failed.
///
/// Each variant is reported per command and never aborts the rest of the batch.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The shell could not be started.
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        /// The shell program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The shell started but its exit status could not be collected.
    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        /// The shell program that was running
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully (or was killed by a signal).
    #[error("{status}{}", stderr_suffix(.stderr))]
    Failed {
        /// Exit status of the shell
        status: ExitStatus,
        /// Trimmed standard error output collected until shortly after the
        /// shell exited, possibly empty
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
