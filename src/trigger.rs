//! The trigger capability and its logical combinators
//!
//! A [`Trigger`] is a named predicate over an inbound request: `evaluate`
//! answers "should the chaos behavior activate for this request?", and
//! `description` renders a human-readable explanation for logs. Descriptions
//! are diagnostics only — never equality, never control flow.
//!
//! Triggers are closed under negation, conjunction, and disjunction.
//! Conjunction and disjunction use plain short-circuit `&&`/`||` semantics:
//! the right operand of an `AND` is **not evaluated** when the left is false
//! (and symmetrically for `OR` on true). That property is load-bearing for
//! stateful operands — a one-shot or countdown on the right side of an `AND`
//! only advances on calls where the left side passes.

use crate::request::Request;
use std::fmt;
use std::sync::Arc;

/// A composable activation predicate over an inbound request.
///
/// Implementations must be cheap and non-blocking: no I/O, no locks, no
/// sleeping. A single instance is routinely shared across many concurrently
/// handled requests (wrap it in an [`Arc`]), so any internal state must be
/// maintained with atomic operations.
pub trait Trigger: Send + Sync + fmt::Debug {
    /// Decide whether to activate for `request`.
    ///
    /// Never fails and never mutates the request; stateful kinds may update
    /// their own internal counters.
    fn evaluate(&self, request: &dyn Request) -> bool;

    /// Human-readable explanation of the trigger, reflecting current
    /// parameters (e.g. a countdown's remaining calls) where meaningful.
    fn description(&self) -> String;
}

impl<T: Trigger + ?Sized> Trigger for Box<T> {
    fn evaluate(&self, request: &dyn Request) -> bool {
        (**self).evaluate(request)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

impl<T: Trigger + ?Sized> Trigger for Arc<T> {
    fn evaluate(&self, request: &dyn Request) -> bool {
        (**self).evaluate(request)
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

/// Trigger that activates for every request.
///
/// The neutral default: used as the gate of a one-shot when no gating
/// condition is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysTrigger;

impl Trigger for AlwaysTrigger {
    fn evaluate(&self, _request: &dyn Request) -> bool {
        true
    }

    fn description(&self) -> String {
        "always".to_string()
    }
}

/// Logical negation of a trigger.
#[derive(Debug, Clone, Copy)]
pub struct NotTrigger<T> {
    inner: T,
}

impl<T: Trigger> NotTrigger<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Trigger> Trigger for NotTrigger<T> {
    fn evaluate(&self, request: &dyn Request) -> bool {
        !self.inner.evaluate(request)
    }

    fn description(&self) -> String {
        format!("NOT {}", self.inner.description())
    }
}

/// Conjunction of two triggers.
///
/// Short-circuits: `right` is not evaluated when `left` is false, so a
/// stateful `right` operand is not guaranteed to be invoked on every call.
#[derive(Debug, Clone, Copy)]
pub struct AndTrigger<A, B> {
    left: A,
    right: B,
}

impl<A: Trigger, B: Trigger> AndTrigger<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A: Trigger, B: Trigger> Trigger for AndTrigger<A, B> {
    fn evaluate(&self, request: &dyn Request) -> bool {
        self.left.evaluate(request) && self.right.evaluate(request)
    }

    fn description(&self) -> String {
        format!("{} AND {}", self.left.description(), self.right.description())
    }
}

/// Disjunction of two triggers.
///
/// Short-circuits: `right` is not evaluated when `left` is already true.
#[derive(Debug, Clone, Copy)]
pub struct OrTrigger<A, B> {
    left: A,
    right: B,
}

impl<A: Trigger, B: Trigger> OrTrigger<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A: Trigger, B: Trigger> Trigger for OrTrigger<A, B> {
    fn evaluate(&self, request: &dyn Request) -> bool {
        self.left.evaluate(request) || self.right.evaluate(request)
    }

    fn description(&self) -> String {
        format!("{} OR {}", self.left.description(), self.right.description())
    }
}

/// Combinator methods available on every sized trigger.
pub trait TriggerExt: Trigger + Sized {
    /// Activate only when both `self` and `other` activate (short-circuit).
    fn and<B: Trigger>(self, other: B) -> AndTrigger<Self, B> {
        AndTrigger::new(self, other)
    }

    /// Activate when either `self` or `other` activates (short-circuit).
    fn or<B: Trigger>(self, other: B) -> OrTrigger<Self, B> {
        OrTrigger::new(self, other)
    }

    /// Invert the activation decision.
    fn negate(self) -> NotTrigger<Self> {
        NotTrigger::new(self)
    }

    /// Erase the concrete type.
    fn boxed(self) -> Box<dyn Trigger>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: Trigger> TriggerExt for T {}
