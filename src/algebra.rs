//! Algebraic composition operators for triggers.
//!
//! This module provides the `Gate` wrapper and operators for composing
//! triggers using intuitive algebraic syntax:
//!
//! - `!Gate(T)` - Negation
//! - `Gate(A) & Gate(B)` - Conjunction (short-circuit)
//! - `Gate(A) | Gate(B)` - Disjunction (short-circuit)
//!
//! # Operator Precedence
//!
//! Rust's standard operator precedence applies: `!` binds tightest, and `&`
//! binds tighter than `|`. `A | B & C` is parsed as `A | (B & C)`; use
//! parentheses for explicit control.
//!
//! # Example
//!
//! ```
//! use poltergeist::prelude::*;
//!
//! // Fire for GET requests, but never when the percentage gate says no
//! let gate = Gate(RequestMatcher::new().method("GET")) & !Gate(PercentageTrigger::new(-1));
//!
//! let request = RequestParts::new("GET", "/");
//! assert!(gate.evaluate(&request));
//! ```

use crate::request::Request;
use crate::trigger::{AndTrigger, NotTrigger, OrTrigger, Trigger};
use std::ops::{BitAnd, BitOr, Not};

/// Opt-in wrapper enabling algebraic composition of triggers.
///
/// The wrapper is itself a [`Trigger`], so composed gates drop straight into
/// any place a trigger is expected. Composition produces the same wrapper
/// types as [`TriggerExt`](crate::trigger::TriggerExt); the operators are
/// pure sugar.
#[derive(Clone, Copy, Debug)]
pub struct Gate<T>(pub T);

impl<T> Gate<T> {
    /// Unwrap the composed trigger.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Trigger> Trigger for Gate<T> {
    fn evaluate(&self, request: &dyn Request) -> bool {
        self.0.evaluate(request)
    }

    fn description(&self) -> String {
        self.0.description()
    }
}

impl<A: Trigger, B: Trigger> BitAnd<Gate<B>> for Gate<A> {
    type Output = Gate<AndTrigger<A, B>>;

    fn bitand(self, rhs: Gate<B>) -> Self::Output {
        Gate(AndTrigger::new(self.0, rhs.0))
    }
}

impl<A: Trigger, B: Trigger> BitOr<Gate<B>> for Gate<A> {
    type Output = Gate<OrTrigger<A, B>>;

    fn bitor(self, rhs: Gate<B>) -> Self::Output {
        Gate(OrTrigger::new(self.0, rhs.0))
    }
}

impl<T: Trigger> Not for Gate<T> {
    type Output = Gate<NotTrigger<T>>;

    fn not(self) -> Self::Output {
        Gate(NotTrigger::new(self.0))
    }
}
