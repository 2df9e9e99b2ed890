// tests/harness/virtual_clock.rs
//
// Virtual clock for testing poll loops.
// Sleeping advances virtual time instead of blocking the test.

use chrono::{DateTime, Duration, Utc};
use helpscout_inbox::Clock;
use std::sync::{Arc, RwLock};

/// A clock that can be controlled for testing.
/// Thread-safe via Arc<RwLock<...>>; clones share the same time.
#[derive(Clone)]
pub struct VirtualClock {
    inner: Arc<RwLock<DateTime<Utc>>>,
    sleeps: Arc<RwLock<Vec<std::time::Duration>>>,
}

impl VirtualClock {
    /// Create a virtual clock set to a specific time.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(time)),
            sleeps: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Advance time by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut guard = self.inner.write().unwrap();
        *guard += duration;
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<std::time::Duration> {
        self.sleeps.read().unwrap().clone()
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.inner.read().unwrap()
    }

    fn sleep(&self, duration: std::time::Duration) {
        self.sleeps.write().unwrap().push(duration);
        self.advance(Duration::from_std(duration).unwrap());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_virtual_clock_at_specific_time() {
        let clock = VirtualClock::at(start());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn test_sleep_advances_without_blocking() {
        let clock = VirtualClock::at(start());
        clock.sleep(std::time::Duration::from_millis(250));
        clock.sleep(std::time::Duration::from_millis(250));
        assert_eq!(clock.now(), start() + Duration::milliseconds(500));
        assert_eq!(clock.sleeps().len(), 2);
    }

    #[test]
    fn test_virtual_clock_is_clone() {
        let clock1 = VirtualClock::at(start());
        let clock2 = clock1.clone();

        // Both clones share the same internal state
        clock1.advance(Duration::seconds(5));
        assert_eq!(clock1.now(), clock2.now());
    }
}
