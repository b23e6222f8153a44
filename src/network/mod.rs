//! Network layer for interface enumeration and range matching.
//!
//! This module provides types and traits for:
//! - Representing interface snapshots ([`InterfaceSnapshot`])
//! - Parsing CIDR ranges ([`AddressRange`])
//! - Fetching interface information ([`AddressFetcher`])
//! - Matching live addresses against ranges ([`AddressMatcher`], [`RangeMatcher`])
//! - Platform-specific implementations ([`platform`])

mod fetcher;
mod interface;
mod matcher;
pub mod platform;
mod range;

pub use fetcher::{AddressFetcher, FetchError};
pub use interface::{InterfaceSnapshot, is_loopback};
pub use matcher::{AddressMatcher, MatchError, RangeMatcher};
pub use range::{AddressRange, RangeError};
