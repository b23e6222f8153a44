//! Range matching against live interface addresses.

use thiserror::Error;

use super::{AddressFetcher, AddressRange, FetchError, RangeError};
use crate::logging::Logger;

/// Error type for a range check.
///
/// Either variant makes the check inconclusive; neither is evidence that
/// connectivity is lost.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A configured range string is malformed. No interfaces were queried.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] RangeError),

    /// The platform could not enumerate interfaces.
    #[error("Failed to query network interfaces: {0}")]
    OsQuery(#[from] FetchError),
}

/// Answers "does any active, non-loopback address fall inside these ranges?"
///
/// This is the seam the watchdog loop depends on, so tests can substitute a stub.
pub trait RangeMatcher: Send + Sync {
    /// Returns `Ok(true)` if at least one candidate address is inside at
    /// least one of `ranges`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] if a range is malformed or interfaces cannot
    /// be enumerated.
    fn matches(&self, ranges: &[String]) -> Result<bool, MatchError>;
}

/// [`RangeMatcher`] backed by a live [`AddressFetcher`].
///
/// Interfaces are fetched fresh on every call.
#[derive(Debug)]
pub struct AddressMatcher<F> {
    fetcher: F,
    logger: Logger,
}

impl<F: AddressFetcher> AddressMatcher<F> {
    /// Creates a matcher over `fetcher`, logging through `logger`.
    #[must_use]
    pub const fn new(fetcher: F, logger: Logger) -> Self {
        Self { fetcher, logger }
    }

    /// Returns the underlying fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn scan(&self, specs: &[String]) -> Result<bool, MatchError> {
        if specs.is_empty() {
            tracing::warn!("cidrs is empty, treating as no match");
            return Ok(false);
        }

        // Every spec must parse before the OS is queried
        let ranges = AddressRange::parse_all(specs)?;

        let interfaces = self.fetcher.fetch()?;
        for interface in &interfaces {
            for address in interface.candidate_addresses() {
                if let Some(range) = ranges.iter().find(|r| r.contains(address)) {
                    tracing::debug!(
                        interface = %interface.name,
                        ip = %address,
                        range = %range,
                        "ip matched"
                    );
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}

impl<F: AddressFetcher> RangeMatcher for AddressMatcher<F> {
    fn matches(&self, ranges: &[String]) -> Result<bool, MatchError> {
        self.logger.in_scope(|| self.scan(ranges))
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
