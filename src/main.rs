//! net-watchdog: connectivity watchdog
//!
//! Entry point for the net-watchdog application.

use net_watchdog::config::{Cli, ValidatedConfig};
use net_watchdog::logging::Logger;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Load and validate configuration before anything is armed
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    let logger = match Logger::from_config(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Logging error: {e}");
            return exit_code::CONFIG_ERROR;
        }
    };

    logger.in_scope(|| {
        tracing::info!(path = %config.source.display(), "load config file");
        tracing::debug!("{config}");
    });

    run_application(config, &logger)
}

/// Runs the watchdog until a termination signal arrives.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(config: ValidatedConfig, logger: &Logger) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            logger.in_scope(|| tracing::error!(error = %e, "failed to create tokio runtime"));
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config, logger.clone())) {
        Ok(_) => exit_code::SUCCESS,
        Err(e) => {
            logger.in_scope(|| tracing::error!(error = %e, "application error"));
            exit_code::runtime_error()
        }
    }
}
