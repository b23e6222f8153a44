//! Recovery command execution.

use std::future::Future;
use std::io;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{ChildStderr, Command};

use super::RecoveryError;
use crate::logging::Logger;

/// Runs a single command string.
///
/// Implementations decide how the string is interpreted; the production
/// implementation hands it to an elevated-privilege shell.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryError`] if the command cannot be started or exits
    /// unsuccessfully.
    fn run(&self, command: &str) -> impl Future<Output = Result<(), RecoveryError>> + Send;
}

/// Runs commands as the last argument of a shell invocation,
/// e.g. `sudo bash -c <command>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRunner {
    program: String,
    args: Vec<String>,
}

impl ShellRunner {
    /// Creates a runner from an invocation prefix such as `["sudo", "bash", "-c"]`.
    ///
    /// Returns `None` if `invocation` is empty.
    #[must_use]
    pub fn new(invocation: &[String]) -> Option<Self> {
        let (program, args) = invocation.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Returns the program that is spawned for every command.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<(), RecoveryError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RecoveryError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Background processes started by the command inherit the stderr
        // pipe, so completion is the shell's exit, never the pipe's EOF.
        let mut captured = Vec::new();
        let status = match child.stderr.take() {
            Some(mut stderr) => {
                let status = {
                    let wait = child.wait();
                    tokio::pin!(wait);
                    tokio::select! {
                        status = &mut wait => status,
                        _ = drain_stderr(&mut stderr, &mut captured) => wait.await,
                    }
                };
                let _ = tokio::time::timeout(
                    STDERR_GRACE,
                    drain_stderr(&mut stderr, &mut captured),
                )
                .await;
                status
            }
            None => child.wait().await,
        }
        .map_err(|source| RecoveryError::Wait {
            program: self.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(RecoveryError::Failed {
                status,
                stderr: String::from_utf8_lossy(&captured).trim().to_string(),
            })
        }
    }
}

/// How long stderr is still read after the shell has exited.
const STDERR_GRACE: Duration = Duration::from_millis(200);

/// Upper bound on the stderr bytes kept for a failure report.
const STDERR_LIMIT: usize = 8 * 1024;

/// Reads `stderr` until EOF, keeping at most [`STDERR_LIMIT`] bytes.
///
/// Each read is cancel-safe, so bytes collected before cancellation stay in
/// `captured`.
async fn drain_stderr(stderr: &mut ChildStderr, captured: &mut Vec<u8>) -> io::Result<()> {
    let mut chunk = [0u8; 1024];
    loop {
        let read = stderr.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        let room = STDERR_LIMIT.saturating_sub(captured.len());
        captured.extend_from_slice(&chunk[..read.min(room)]);
    }
}

/// Result of one recovery command.
#[derive(Debug)]
pub struct RecoveryOutcome {
    /// The command as configured.
    pub command: String,
    /// Whether it succeeded, and why not.
    pub result: Result<(), RecoveryError>,
}

impl RecoveryOutcome {
    /// Returns true if the command succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs a batch of recovery commands.
///
/// This is the seam the watchdog loop depends on, so tests can record
/// invocations instead of spawning processes.
pub trait Recovery: Send + Sync {
    /// Attempts every command once, in order, and reports each outcome.
    fn run(&self, commands: &[String]) -> impl Future<Output = Vec<RecoveryOutcome>> + Send;
}

/// [`Recovery`] that runs commands sequentially through a [`CommandRunner`].
///
/// A failed command is logged and the sequence continues. There are no
/// retries and no per-command timeout.
#[derive(Debug)]
pub struct RecoveryExecutor<R> {
    runner: R,
    logger: Logger,
}

impl<R: CommandRunner> RecoveryExecutor<R> {
    /// Creates an executor over `runner`, logging through `logger`.
    #[must_use]
    pub const fn new(runner: R, logger: Logger) -> Self {
        Self { runner, logger }
    }

    /// Returns the underlying runner.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    async fn run_all(&self, commands: &[String]) -> Vec<RecoveryOutcome> {
        let mut outcomes = Vec::with_capacity(commands.len());

        for command in commands {
            tracing::debug!(command = %command, "run command");
            let result = self.runner.run(command).await;
            if let Err(ref e) = result {
                tracing::error!(command = %command, error = %e, "recovery command failed");
            }
            outcomes.push(RecoveryOutcome {
                command: command.clone(),
                result,
            });
        }

        outcomes
    }
}

impl<R: CommandRunner> Recovery for RecoveryExecutor<R> {
    fn run(&self, commands: &[String]) -> impl Future<Output = Vec<RecoveryOutcome>> + Send {
        self.logger.instrument(self.run_all(commands))
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
