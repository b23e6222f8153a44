//! net-watchdog: connectivity watchdog
//!
//! A library for checking that a host still holds an address inside a set
//! of configured ranges, and running recovery commands when it does not.

pub mod config;
pub mod lifecycle;
pub mod logging;
pub mod network;
pub mod recovery;
pub mod time;
pub mod watchdog;
