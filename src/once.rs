//! One-shot activation gate.

use crate::request::Request;
use crate::trigger::{AlwaysTrigger, Trigger};
use std::sync::atomic::{AtomicBool, Ordering};

/// Trigger that activates exactly once, the first time its gate condition
/// holds.
///
/// The gate defaults to [`AlwaysTrigger`], making a bare `OnceTrigger` fire
/// on the very first evaluation. Calls where the gate evaluates false do
/// **not** consume the one-shot; the trigger stays armed until a satisfied
/// call claims it.
///
/// The claim is a compare-and-swap on the armed flag, so under concurrent
/// evaluation at most one caller ever observes true. A get-then-set would
/// let two racing threads both fire.
#[derive(Debug)]
pub struct OnceTrigger<T = AlwaysTrigger> {
    armed: AtomicBool,
    gate: T,
}

impl OnceTrigger<AlwaysTrigger> {
    /// One-shot that fires on the first evaluation.
    pub fn new() -> Self {
        Self::gated(AlwaysTrigger)
    }
}

impl Default for OnceTrigger<AlwaysTrigger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Trigger> OnceTrigger<T> {
    /// One-shot that fires the first time `gate` is satisfied.
    pub fn gated(gate: T) -> Self {
        Self { armed: AtomicBool::new(true), gate }
    }

    /// Whether the one-shot is still unclaimed.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }
}

impl<T: Trigger> Trigger for OnceTrigger<T> {
    fn evaluate(&self, request: &dyn Request) -> bool {
        if !self.gate.evaluate(request) {
            // An unsatisfied gate never consumes the shot.
            return false;
        }

        // Claim the shot only if still armed; exactly one racing caller can
        // win this exchange.
        let fired = self
            .armed
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if fired {
            tracing::debug!(gate = %self.gate.description(), "one-shot trigger fired");
        }
        fired
    }

    fn description(&self) -> String {
        if self.is_armed() {
            format!("once when {}", self.gate.description())
        } else {
            format!("once when {} (fired)", self.gate.description())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::RequestMatcher;
    use crate::request::RequestParts;

    #[test]
    fn fires_on_the_first_call_and_never_again() {
        let req = RequestParts::new("GET", "/");
        let trigger = OnceTrigger::new();

        assert!(trigger.evaluate(&req));
        for _ in 0..100 {
            assert!(!trigger.evaluate(&req));
        }
    }

    #[test]
    fn an_unsatisfied_gate_does_not_consume_the_shot() {
        let trigger = OnceTrigger::gated(RequestMatcher::new().method("POST"));
        let get = RequestParts::new("GET", "/orders");
        let post = RequestParts::new("POST", "/orders");

        assert!(!trigger.evaluate(&get));
        assert!(trigger.is_armed());
        assert!(trigger.evaluate(&post));
        assert!(!trigger.evaluate(&post));
    }

    #[test]
    fn description_tracks_the_armed_state() {
        let req = RequestParts::new("GET", "/");
        let trigger = OnceTrigger::new();

        assert_eq!(trigger.description(), "once when always");
        trigger.evaluate(&req);
        assert_eq!(trigger.description(), "once when always (fired)");
    }
}
