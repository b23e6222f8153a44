//! Error types for the lifecycle layer.

use thiserror::Error;
use tokio::task::JoinError;

/// Error type for lifecycle failures.
///
/// Any of these ends the process with a runtime error.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A termination signal handler could not be registered.
    #[error("Failed to install signal handler: {0}")]
    SignalInstall(#[source] std::io::Error),

    /// The tick task panicked or was cancelled.
    #[error("Tick task failed: {0}")]
    TickTask(#[from] JoinError),

    /// The signal task ended without delivering a signal.
    #[error("Shutdown notifier dropped before a signal was delivered")]
    ShutdownNotifierDropped,
}
