//! Warm-up countdown gate.

use crate::request::Request;
use crate::trigger::Trigger;
use std::sync::atomic::{AtomicU64, Ordering};

/// Trigger that stays inactive for a fixed number of initial calls, then
/// activates forever.
///
/// A warm-up gate, not a fire-N-times limiter: `CountdownTrigger::new(3)`
/// answers false on the first three evaluations and true on every one after
/// that. `new(0)` is active from the first call.
///
/// The decrement and the decision come from the same atomic operation, so
/// the N-th call boundary is exact even when many threads evaluate the same
/// instance at once.
#[derive(Debug)]
pub struct CountdownTrigger {
    remaining: AtomicU64,
}

impl CountdownTrigger {
    pub fn new(count: u64) -> Self {
        Self { remaining: AtomicU64::new(count) }
    }

    /// Calls left before the trigger starts activating.
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Acquire)
    }
}

impl Trigger for CountdownTrigger {
    fn evaluate(&self, _request: &dyn Request) -> bool {
        // Decrement-if-positive in one atomic step; `checked_sub` refuses to
        // go below zero, turning exhaustion into the Err arm.
        match self.remaining.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(1) => {
                tracing::debug!("countdown exhausted, trigger is now active");
                false
            }
            Ok(_) => false,
            Err(_) => true,
        }
    }

    fn description(&self) -> String {
        match self.remaining() {
            0 => "countdown complete".to_string(),
            n => format!("{n} more requests before activation"),
        }
    }
}
