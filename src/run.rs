//! Application execution logic.
//!
//! Wires the platform fetcher, shell runner and watchdog loop into a
//! lifecycle controller and runs it until a termination signal arrives.

use std::sync::Arc;

use thiserror::Error;

use net_watchdog::config::ValidatedConfig;
use net_watchdog::lifecycle::{LifecycleController, LifecycleError, ShutdownSignal, SignalListener};
use net_watchdog::logging::Logger;
use net_watchdog::network::AddressMatcher;
use net_watchdog::network::platform::PlatformFetcher;
use net_watchdog::recovery::{RecoveryExecutor, ShellRunner};
use net_watchdog::watchdog::WatchdogLoop;

/// Type alias for the application's watchdog loop.
type AppWatchdog = WatchdogLoop<AddressMatcher<PlatformFetcher>, RecoveryExecutor<ShellRunner>>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The recovery shell has no program to run.
    #[error("Recovery shell is empty")]
    EmptyRecoveryShell,

    /// The lifecycle controller failed.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Runs the watchdog until a termination signal arrives.
///
/// Returns the signal that stopped it.
///
/// # Errors
///
/// Returns an error if:
/// - Signal handlers cannot be installed
/// - The tick task panics
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// real OS signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, logger: Logger) -> Result<ShutdownSignal, RunError> {
    // Register handlers before arming so a failure surfaces before any tick
    let signals = SignalListener::install().map_err(LifecycleError::SignalInstall)?;

    let period = config.period;
    let watchdog = build_watchdog(config, &logger)?;
    let controller = LifecycleController::new(Arc::new(watchdog), period, logger.clone());

    logger.in_scope(|| tracing::info!(period = ?period, "watchdog started"));

    let signal = controller
        .run(signals.first_shutdown(logger.clone()))
        .await?;
    Ok(signal)
}

/// Builds the watchdog loop from configuration.
fn build_watchdog(config: ValidatedConfig, logger: &Logger) -> Result<AppWatchdog, RunError> {
    let runner =
        ShellRunner::new(&config.recovery_shell).ok_or(RunError::EmptyRecoveryShell)?;

    Ok(WatchdogLoop::new(
        AddressMatcher::new(PlatformFetcher::default(), logger.clone()),
        RecoveryExecutor::new(runner, logger.clone()),
        config.address_ranges,
        config.recovery_commands,
        logger.clone(),
    ))
}
