//! Process lifecycle: the recurring timer and signal-driven shutdown.
//!
//! This module provides:
//! - The per-tick seam ([`TickHandler`])
//! - Timer and shutdown orchestration ([`LifecycleController`], [`LifecycleState`])
//! - OS signal handling ([`SignalListener`], [`ShutdownSignal`])
//! - Error handling ([`LifecycleError`])

mod controller;
mod error;
mod signal;

pub use controller::{LifecycleController, LifecycleState, TickHandler};
pub use error::LifecycleError;
pub use signal::{ShutdownSignal, SignalListener};
