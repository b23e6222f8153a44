//! Wall-clock abstraction.
//!
//! Log rotation stamps backups with the current time and prunes them by age;
//! [`Clock`] lets tests drive both without sleeping.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as milliseconds since the Unix epoch.
    ///
    /// Times before the epoch collapse to zero.
    fn unix_millis(&self) -> u64 {
        self.now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Production clock delegating to [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Converts epoch milliseconds back into a [`SystemTime`].
#[must_use]
pub fn from_unix_millis(millis: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(millis)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Manually advanced clock. Clones share the same time.
    #[derive(Debug, Clone, Default)]
    pub struct MockClock {
        millis: Arc<AtomicU64>,
    }

    impl MockClock {
        pub fn at_millis(millis: u64) -> Self {
            Self {
                millis: Arc::new(AtomicU64::new(millis)),
            }
        }

        pub fn advance(&self, by: Duration) {
            let by = u64::try_from(by.as_millis()).unwrap();
            self.millis.fetch_add(by, Ordering::SeqCst);
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> SystemTime {
            from_unix_millis(self.millis.load(Ordering::SeqCst))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockClock;
    use super::*;

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.unix_millis() > 0);
    }

    #[test]
    fn unix_millis_round_trips_through_system_time() {
        let clock = MockClock::at_millis(1_700_000_000_123);
        assert_eq!(clock.unix_millis(), 1_700_000_000_123);
        assert_eq!(from_unix_millis(clock.unix_millis()), clock.now());
    }

    #[test]
    fn mock_clock_clones_share_time() {
        let clock = MockClock::at_millis(0);
        let other = clock.clone();

        clock.advance(Duration::from_secs(2));

        assert_eq!(other.unix_millis(), 2_000);
    }
}
