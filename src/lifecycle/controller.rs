//! Timer and shutdown orchestration.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use super::{LifecycleError, ShutdownSignal};
use crate::logging::Logger;

/// Work performed on every timer tick.
pub trait TickHandler: Send + Sync {
    /// Runs one tick to completion. Ticks never overlap.
    fn on_tick(&self) -> impl Future<Output = ()> + Send;
}

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Timer armed, no tick has fired yet.
    #[default]
    Armed,
    /// At least one tick has been dispatched.
    Running,
    /// A termination signal arrived; no further ticks are dispatched.
    Stopping,
    /// The tick task has been drained.
    Terminated,
}

/// Owns the recurring timer and turns a termination signal into an
/// orderly shutdown.
///
/// Ticks run on a dedicated task. The first tick fires one full period
/// after [`run`](Self::run) is called, and a slow tick delays the next one
/// rather than queueing missed ticks. Stop is only observed between ticks,
/// so an in-flight tick always finishes.
#[derive(Debug)]
pub struct LifecycleController<H> {
    handler: Arc<H>,
    period: Duration,
    logger: Logger,
    state: Arc<watch::Sender<LifecycleState>>,
}

impl<H: TickHandler + 'static> LifecycleController<H> {
    /// Creates a controller dispatching to `handler` every `period`.
    ///
    /// `period` must be non-zero.
    #[must_use]
    pub fn new(handler: Arc<H>, period: Duration, logger: Logger) -> Self {
        let (state, _) = watch::channel(LifecycleState::Armed);
        Self {
            handler,
            period,
            logger,
            state: Arc::new(state),
        }
    }

    /// Returns a receiver observing state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Arms the timer and blocks until `shutdown` resolves and the tick
    /// task has drained.
    ///
    /// Returns the signal that caused the shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TickTask`] if the tick task panicked, or
    /// [`LifecycleError::ShutdownNotifierDropped`] if `shutdown` panicked.
    pub async fn run<S>(self, shutdown: S) -> Result<ShutdownSignal, LifecycleError>
    where
        S: Future<Output = ShutdownSignal> + Send + 'static,
    {
        let Self {
            handler,
            period,
            logger,
            state,
        } = self;

        let (stop_tx, stop_rx) = watch::channel(false);
        let (done_tx, done_rx) = oneshot::channel();

        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let ticks = tokio::spawn(logger.instrument(dispatch_ticks(
            handler,
            interval,
            stop_rx,
            Arc::clone(&state),
        )));

        let signal_state = Arc::clone(&state);
        tokio::spawn(logger.instrument(async move {
            let signal = shutdown.await;
            tracing::info!(signal = %signal, "received shutdown signal, stopping");
            signal_state.send_replace(LifecycleState::Stopping);
            stop_tx.send_replace(true);
            if done_tx.send(signal).is_err() {
                tracing::debug!("main context no longer waiting");
            }
        }));

        logger.in_scope(|| tracing::debug!(period = ?period, "timer armed"));

        let Ok(signal) = done_rx.await else {
            ticks.abort();
            return Err(LifecycleError::ShutdownNotifierDropped);
        };

        ticks.await?;
        state.send_replace(LifecycleState::Terminated);
        logger.in_scope(|| tracing::info!("watchdog stopped"));

        Ok(signal)
    }
}

async fn dispatch_ticks<H: TickHandler>(
    handler: Arc<H>,
    mut interval: Interval,
    mut stop: watch::Receiver<bool>,
    state: Arc<watch::Sender<LifecycleState>>,
) {
    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            _ = interval.tick() => {}
        }

        state.send_if_modified(|current| {
            if *current == LifecycleState::Armed {
                *current = LifecycleState::Running;
                true
            } else {
                false
            }
        });

        handler.on_tick().await;
    }

    tracing::debug!("tick loop stopped");
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
