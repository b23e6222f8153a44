//! Single-tick evaluation.

use crate::lifecycle::TickHandler;
use crate::logging::Logger;
use crate::network::{MatchError, RangeMatcher};
use crate::recovery::{Recovery, RecoveryOutcome};

/// What one tick observed and did.
#[derive(Debug)]
pub enum TickOutcome {
    /// An address matched; nothing was run.
    Connected,

    /// No address matched; the recovery commands were attempted.
    Recovered(Vec<RecoveryOutcome>),

    /// The check itself failed; nothing was run.
    Inconclusive(MatchError),
}

impl TickOutcome {
    /// Returns true if recovery commands were attempted.
    #[must_use]
    pub const fn ran_recovery(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }
}

/// Checks connectivity and triggers recovery when the check misses.
///
/// There is no failure counter, hysteresis or backoff: every tick that
/// misses runs the full command list again.
#[derive(Debug)]
pub struct WatchdogLoop<M, R> {
    matcher: M,
    recovery: R,
    ranges: Vec<String>,
    commands: Vec<String>,
    logger: Logger,
}

impl<M: RangeMatcher, R: Recovery> WatchdogLoop<M, R> {
    /// Creates a loop checking `ranges` and running `commands` on a miss.
    #[must_use]
    pub const fn new(
        matcher: M,
        recovery: R,
        ranges: Vec<String>,
        commands: Vec<String>,
        logger: Logger,
    ) -> Self {
        Self {
            matcher,
            recovery,
            ranges,
            commands,
            logger,
        }
    }

    /// Returns the matcher.
    #[must_use]
    pub const fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Returns the recovery.
    #[must_use]
    pub const fn recovery(&self) -> &R {
        &self.recovery
    }

    /// Runs one evaluation.
    pub async fn tick(&self) -> TickOutcome {
        self.logger.instrument(self.evaluate()).await
    }

    async fn evaluate(&self) -> TickOutcome {
        let checked = self.matcher.matches(&self.ranges);

        match checked {
            Err(e) => {
                tracing::error!(error = %e, "check ip error");
                TickOutcome::Inconclusive(e)
            }
            Ok(true) => {
                tracing::debug!("ip matched, do nothing");
                TickOutcome::Connected
            }
            Ok(false) => {
                tracing::info!("ip not matched, run restart commands");
                let outcomes = self.recovery.run(&self.commands).await;
                let failed = outcomes.iter().filter(|o| !o.is_success()).count();
                tracing::info!(
                    commands = outcomes.len(),
                    failed,
                    "restart network finished"
                );
                TickOutcome::Recovered(outcomes)
            }
        }
    }
}

impl<M: RangeMatcher, R: Recovery> TickHandler for WatchdogLoop<M, R> {
    async fn on_tick(&self) {
        self.tick().await;
    }
}

#[cfg(test)]
#[path = "tick_tests.rs"]
mod tests;
