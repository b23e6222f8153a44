//! Logging layer.
//!
//! This module provides:
//! - An explicitly constructed logger handle ([`Logger`])
//! - Severity and output format settings ([`LogLevel`], [`LogFormat`])
//! - A size-based rotating file writer ([`RotatingFile`], [`RotationPolicy`])
//!
//! No process-wide default subscriber is installed. Each component owns a
//! [`Logger`] clone and routes its `tracing` events through it, so tests
//! can capture one component's output without global side effects.

mod level;
mod rotate;

use std::future::Future;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Dispatch;
use tracing::instrument::{WithDispatch, WithSubscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

pub use level::{LogFormat, LogLevel};
pub use rotate::{MEGABYTE, RotatingFile, RotationPolicy};

/// Where and how log events are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoggingConfig {
    /// Minimum severity.
    pub level: LogLevel,
    /// Line format.
    pub format: LogFormat,
    /// Rotating file target; standard output when `None`.
    pub rotation: Option<RotationPolicy>,
}

/// Error type for logger construction.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("Failed to open log file '{}': {source}", path.display())]
    OpenFile {
        /// Path of the log file
        path: std::path::PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A cheaply cloneable handle to a configured log sink.
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    /// Builds the logger described by `config`.
    ///
    /// `RUST_LOG` overrides the configured level when set.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::OpenFile`] if the rotating log file cannot be opened.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, LoggingError> {
        let filter = env_filter(config.level, true);

        let dispatch = match &config.rotation {
            Some(policy) => {
                let file =
                    RotatingFile::open(policy.clone()).map_err(|source| LoggingError::OpenFile {
                        path: policy.filename.clone(),
                        source,
                    })?;
                build_dispatch(filter, config.format, false, Mutex::new(file))
            }
            None => build_dispatch(
                filter,
                config.format,
                config.format == LogFormat::Text,
                std::io::stdout,
            ),
        };

        Ok(Self { dispatch })
    }

    /// Builds a logger writing to an arbitrary writer, ignoring `RUST_LOG`.
    #[must_use]
    pub fn with_writer<W>(level: LogLevel, format: LogFormat, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self {
            dispatch: build_dispatch(env_filter(level, false), format, false, writer),
        }
    }

    /// A logger that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Runs `f` with this logger as the current event sink.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Attaches this logger to `future` for every poll.
    pub fn instrument<F: Future>(&self, future: F) -> WithDispatch<F> {
        future.with_subscriber(self.dispatch.clone())
    }
}

fn env_filter(level: LogLevel, from_env: bool) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(level.as_level_filter().into());
    if from_env {
        builder.from_env_lossy()
    } else {
        builder.parse_lossy("")
    }
}

fn build_dispatch<W>(filter: EnvFilter, format: LogFormat, ansi: bool, writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);

    match format {
        LogFormat::Json => Dispatch::new(builder.json().finish()),
        LogFormat::Text => Dispatch::new(builder.finish()),
    }
}
