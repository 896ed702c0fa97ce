//! Time-based triggers: absolute deadlines and relative delays.
//!
//! Both kinds read the injected [`Clock`] and never an unabstracted wall
//! clock, so their behavior is deterministic under a
//! [`ManualClock`](crate::clock::ManualClock) in tests.

use crate::clock::{Clock, SystemClock};
use crate::request::Request;
use crate::trigger::Trigger;
use chrono::{DateTime, SecondsFormat};
use std::sync::Arc;

/// RFC 3339 rendering of an epoch-millisecond instant for descriptions.
fn format_instant(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("{millis}ms past the epoch"))
}

/// Trigger that activates strictly after an absolute instant.
///
/// Activates iff `clock.now_millis() > end_millis`. With a forward-only
/// clock the decision is monotone: once past the deadline it never reverts
/// to inactive.
#[derive(Debug, Clone)]
pub struct DeadlineTrigger {
    end_millis: u64,
    clock: Arc<dyn Clock>,
}

impl DeadlineTrigger {
    /// Deadline measured against the system clock.
    pub fn new(end_millis: u64) -> Self {
        Self::with_clock(end_millis, Arc::new(SystemClock))
    }

    /// Deadline measured against a caller-supplied clock.
    pub fn with_clock(end_millis: u64, clock: Arc<dyn Clock>) -> Self {
        Self { end_millis, clock }
    }
}

impl Trigger for DeadlineTrigger {
    fn evaluate(&self, _request: &dyn Request) -> bool {
        self.clock.now_millis() > self.end_millis
    }

    fn description(&self) -> String {
        format!("after {}", format_instant(self.end_millis))
    }
}

/// Trigger that activates a fixed period after its own construction.
///
/// The activation threshold `end = now + period` is computed **once, at
/// construction**; evaluation is then identical to a [`DeadlineTrigger`] at
/// `end`. Two delays built at different times are therefore inequivalent
/// even with identical periods.
#[derive(Debug, Clone)]
pub struct DelayTrigger {
    period_millis: u64,
    end_millis: u64,
    clock: Arc<dyn Clock>,
}

impl DelayTrigger {
    /// Delay measured against the system clock.
    pub fn new(period_millis: u64) -> Self {
        Self::with_clock(period_millis, Arc::new(SystemClock))
    }

    /// Delay measured against a caller-supplied clock. The threshold is
    /// fixed here, from the clock's current instant.
    pub fn with_clock(period_millis: u64, clock: Arc<dyn Clock>) -> Self {
        let end_millis = clock.now_millis().saturating_add(period_millis);
        Self { period_millis, end_millis, clock }
    }
}

impl Trigger for DelayTrigger {
    fn evaluate(&self, _request: &dyn Request) -> bool {
        self.clock.now_millis() > self.end_millis
    }

    fn description(&self) -> String {
        format!("{}ms after arming (opens {})", self.period_millis, format_instant(self.end_millis))
    }
}
