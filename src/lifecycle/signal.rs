//! Termination-class OS signals.

use std::fmt;
use std::io;

use crate::logging::Logger;

/// The signal that ended the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutdownSignal {
    /// SIGHUP
    Hangup,
    /// SIGINT, or Ctrl+C on Windows
    Interrupt,
    /// SIGTERM
    Terminate,
    /// SIGQUIT
    Quit,
}

impl ShutdownSignal {
    /// Conventional signal name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hangup => "SIGHUP",
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
            Self::Quit => "SIGQUIT",
        }
    }
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registered handlers for every termination-class signal.
///
/// Handlers are installed eagerly so that a registration failure surfaces
/// before the timer is armed. Only the first signal is acted on; see
/// [`first_shutdown`](Self::first_shutdown) for what happens to later ones.
#[derive(Debug)]
pub struct SignalListener {
    #[cfg(unix)]
    hangup: tokio::signal::unix::Signal,
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
    #[cfg(unix)]
    quit: tokio::signal::unix::Signal,
    #[cfg(windows)]
    ctrl_c: tokio::signal::windows::CtrlC,
}

impl SignalListener {
    /// Registers SIGHUP, SIGINT, SIGTERM and SIGQUIT handlers.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if any handler cannot be registered.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            hangup: signal(SignalKind::hangup())?,
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    /// Registers the Ctrl+C handler.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the handler cannot be registered.
    #[cfg(windows)]
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Resolves with the first termination signal.
    ///
    /// The handlers stay registered afterwards, so repeated signals never
    /// fall back to the default OS action; each one is logged at warn level
    /// until the runtime shuts down.
    pub async fn first_shutdown(mut self, logger: Logger) -> ShutdownSignal {
        let first = self.recv().await;
        tokio::spawn(logger.instrument(async move {
            loop {
                let repeated = self.recv().await;
                tracing::warn!(
                    signal = %repeated,
                    "shutdown already in progress, waiting for the running tick"
                );
            }
        }));
        first
    }

    /// Waits for the next termination signal.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> ShutdownSignal {
        tokio::select! {
            _ = self.hangup.recv() => ShutdownSignal::Hangup,
            _ = self.interrupt.recv() => ShutdownSignal::Interrupt,
            _ = self.terminate.recv() => ShutdownSignal::Terminate,
            _ = self.quit.recv() => ShutdownSignal::Quit,
        }
    }

    /// Waits for the next Ctrl+C.
    #[cfg(windows)]
    pub async fn recv(&mut self) -> ShutdownSignal {
        self.ctrl_c.recv().await;
        ShutdownSignal::Interrupt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_conventional_names() {
        assert_eq!(ShutdownSignal::Hangup.to_string(), "SIGHUP");
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
        assert_eq!(ShutdownSignal::Quit.to_string(), "SIGQUIT");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn install_registers_handlers() {
        assert!(SignalListener::install().is_ok());
    }

    // Raising signals affects the whole test process, so every raise lives
    // in this one test.
    #[cfg(unix)]
    #[tokio::test]
    async fn raised_signals_are_received_then_logged_as_warnings() {
        use crate::logging::LogLevel;
        use crate::logging::capture::CapturedLogs;
        use nix::sys::signal::{Signal, raise};
        use std::time::Duration;

        let logs = CapturedLogs::new();
        let mut listener = SignalListener::install().unwrap();

        raise(Signal::SIGHUP).unwrap();
        assert_eq!(listener.recv().await, ShutdownSignal::Hangup);

        raise(Signal::SIGTERM).unwrap();
        assert_eq!(
            listener.first_shutdown(logs.logger(LogLevel::Info)).await,
            ShutdownSignal::Terminate
        );

        raise(Signal::SIGQUIT).unwrap();
        for _ in 0..100 {
            if !logs.messages_at("WARN").is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let warnings: Vec<_> = logs
            .events()
            .into_iter()
            .filter(|e| e["level"] == "WARN")
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0]["fields"]["signal"], "SIGQUIT");
    }
}
