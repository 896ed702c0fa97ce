#![forbid(unsafe_code)]
#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # Poltergeist 👻
//!
//! Chaos triggers for fault-injection middleware: composable, lock-free
//! predicates that decide, per request, whether a fault behavior should
//! activate right now. The crate never injects anything itself — it only
//! answers "activate?" as a boolean, quickly enough to sit on the hot path
//! of a request handler.
//!
//! ## Features
//!
//! - **Stateless triggers**: always, percentage-of-requests, deadline, delay
//! - **Stateful triggers** with lock-free atomics: one-shot (`Once`),
//!   warm-up countdown
//! - **Request matching** over method/path/query/header/body patterns
//! - **Combinators** (`NOT`/`AND`/`OR`) with short-circuit semantics, plus
//!   an opt-in `!`/`&`/`|` operator algebra
//! - **Declarative construction** of trigger graphs from JSON-shaped config
//! - **Injectable clock, randomness, and environment** for deterministic tests
//!
//! ## Quick Start
//!
//! ```rust
//! use poltergeist::{parse_trigger, Clock, RequestParts, SystemClock, Trigger};
//! use std::sync::Arc;
//!
//! let config = serde_json::json!({
//!     "type": "once",
//!     "trigger": { "type": "request", "method": "POST", "path": "^/orders" }
//! });
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//! let trigger = parse_trigger(&config, &clock).expect("well-formed trigger config");
//!
//! let checkout = RequestParts::new("POST", "/orders/42");
//! assert!(trigger.evaluate(&checkout)); // fires on the first matching request
//! assert!(!trigger.evaluate(&checkout)); // then never again
//! ```
//!
//! A trigger is built once and then shared (via `Arc`) across every thread
//! handling requests; the stateful kinds stay correct under that sharing
//! without taking any lock.

pub mod algebra;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod env;
pub mod matcher;
pub mod once;
pub mod percentage;
pub mod prelude;
pub mod random;
pub mod request;
pub mod timing;
pub mod trigger;

// Re-exports
pub use algebra::Gate;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{parse_trigger, parse_trigger_str, TriggerParseError};
pub use countdown::CountdownTrigger;
pub use env::{Env, MapEnv, ProcessEnv};
pub use matcher::RequestMatcher;
pub use once::OnceTrigger;
pub use percentage::{PercentageTrigger, DEFAULT_PERCENTAGE};
pub use random::{RandomSource, SequenceSource, ThreadLocalRandom};
pub use request::{Request, RequestParts};
pub use timing::{DeadlineTrigger, DelayTrigger};
pub use trigger::{AlwaysTrigger, AndTrigger, NotTrigger, OrTrigger, Trigger, TriggerExt};
