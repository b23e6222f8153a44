//! The evaluate-and-react loop body.
//!
//! Each tick asks a [`RangeMatcher`](crate::network::RangeMatcher) whether the
//! host still holds an address in the configured ranges and, when it does not,
//! hands the configured commands to a [`Recovery`](crate::recovery::Recovery).
//! Nothing is remembered between ticks.

mod tick;

pub use tick::{TickOutcome, WatchdogLoop};
