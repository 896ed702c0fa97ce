//! Clock abstractions used by the time-based triggers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock abstraction so timing can be faked in tests.
///
/// The convention is milliseconds since the unix epoch, matching the
/// timestamps carried by declarative deadline configs.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now_millis(&self) -> u64;
}

/// Wall clock backed by `SystemTime::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Clones share the same instant, so a test can hold one handle while the
/// trigger under test holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_the_epoch_and_non_decreasing() {
        let clock = SystemClock;
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(first > 0);
        assert!(second >= first);
    }

    #[test]
    fn manual_clock_advances_and_jumps() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_millis(), 0);

        clock.advance(250);
        assert_eq!(clock.now_millis(), 250);

        clock.set(10_000);
        assert_eq!(clock.now_millis(), 10_000);
    }

    #[test]
    fn manual_clock_clones_share_the_instant() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        clock.advance(42);
        assert_eq!(handle.now_millis(), 42);
    }
}
