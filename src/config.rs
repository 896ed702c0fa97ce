//! Declarative construction of trigger graphs from JSON-shaped config.
//!
//! A config node is an object carrying a `type` discriminator plus
//! type-specific fields:
//!
//! ```json
//! { "type": "once", "trigger": { "type": "countdown", "count": 2 } }
//! ```
//!
//! | `type` | fields | produces |
//! |---|---|---|
//! | `always` | — | [`AlwaysTrigger`] |
//! | `percentage` | `percentage` (int) | [`PercentageTrigger`] |
//! | `deadline` | `endTime` (epoch millis or RFC 3339 string) | [`DeadlineTrigger`] |
//! | `delay` | `period` (millis) | [`DelayTrigger`] |
//! | `countdown` | `count` (int) | [`CountdownTrigger`] |
//! | `once` | `trigger` (nested node, optional) | [`OnceTrigger`] |
//! | `request` | `method`/`path`/`queries`/`headers`/`body`, all optional | [`RequestMatcher`] |
//!
//! Parsing is strict: an unknown `type`, a missing or malformed required
//! field, or a pattern that does not compile is a hard failure, never a
//! silent fallback. Nested triggers parse eagerly, so a nested failure
//! aborts the parent parse.

use crate::clock::Clock;
use crate::countdown::CountdownTrigger;
use crate::matcher::RequestMatcher;
use crate::once::OnceTrigger;
use crate::percentage::PercentageTrigger;
use crate::timing::{DeadlineTrigger, DelayTrigger};
use crate::trigger::{AlwaysTrigger, Trigger};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Failures raised while parsing a trigger config node.
#[derive(thiserror::Error, Debug)]
pub enum TriggerParseError {
    /// Raw config text is not valid JSON.
    #[error("trigger config is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    /// Config node is not a JSON object.
    #[error("trigger config must be a JSON object")]
    NotAnObject,
    /// The `type` discriminator is absent.
    #[error("trigger config is missing its 'type' discriminator")]
    MissingType,
    /// The `type` discriminator names no known trigger kind.
    #[error("unknown trigger type '{0}'")]
    UnknownType(String),
    /// A field required by the resolved type is absent.
    #[error("trigger type '{ty}' requires field '{field}'")]
    MissingField {
        /// The resolved trigger type.
        ty: &'static str,
        /// The absent field.
        field: &'static str,
    },
    /// A field is present but cannot be coerced to its expected shape.
    #[error("field '{field}' is malformed: expected {expected}")]
    MalformedField {
        /// The offending field.
        field: &'static str,
        /// What the field should have held.
        expected: &'static str,
    },
    /// A timestamp field does not denote a representable instant.
    #[error("field '{field}' is not a valid timestamp: {reason}")]
    InvalidTimestamp {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The `request` matcher spec has the wrong shape.
    #[error("malformed request matcher spec: {0}")]
    BadRequestSpec(#[source] serde_json::Error),
    /// A pattern source fails to compile.
    #[error("pattern for {field} does not compile: {source}")]
    InvalidPattern {
        /// Which pattern field failed.
        field: String,
        /// The regex compile error.
        #[source]
        source: regex::Error,
    },
}

/// Parse a config node into a live trigger graph.
///
/// `clock` is threaded to the time-based kinds so graphs stay deterministic
/// under a test clock. Recurses for `once`'s nested trigger.
pub fn parse_trigger(
    node: &Value,
    clock: &Arc<dyn Clock>,
) -> Result<Box<dyn Trigger>, TriggerParseError> {
    let object = node.as_object().ok_or(TriggerParseError::NotAnObject)?;
    let ty = object
        .get("type")
        .ok_or(TriggerParseError::MissingType)?
        .as_str()
        .ok_or(TriggerParseError::MalformedField { field: "type", expected: "a string" })?;

    let trigger: Box<dyn Trigger> = match ty {
        "always" => Box::new(AlwaysTrigger),
        "percentage" => {
            Box::new(PercentageTrigger::new(require_int(object, "percentage", "percentage")?))
        }
        "deadline" => {
            let field = object
                .get("endTime")
                .ok_or(TriggerParseError::MissingField { ty: "deadline", field: "endTime" })?;
            Box::new(DeadlineTrigger::with_clock(parse_end_time(field)?, clock.clone()))
        }
        "delay" => {
            let period = require_millis(object, "period", "delay")?;
            Box::new(DelayTrigger::with_clock(period, clock.clone()))
        }
        "countdown" => Box::new(CountdownTrigger::new(require_millis(object, "count", "countdown")?)),
        "once" => match object.get("trigger") {
            Some(sub) => Box::new(OnceTrigger::gated(parse_trigger(sub, clock)?)),
            None => Box::new(OnceTrigger::new()),
        },
        "request" => Box::new(parse_request_matcher(node)?),
        other => return Err(TriggerParseError::UnknownType(other.to_string())),
    };

    tracing::debug!(%ty, description = %trigger.description(), "parsed trigger config");
    Ok(trigger)
}

/// [`parse_trigger`] over raw JSON text.
pub fn parse_trigger_str(
    raw: &str,
    clock: &Arc<dyn Clock>,
) -> Result<Box<dyn Trigger>, TriggerParseError> {
    let node: Value = serde_json::from_str(raw).map_err(TriggerParseError::InvalidJson)?;
    parse_trigger(&node, clock)
}

fn require_int(
    object: &Map<String, Value>,
    field: &'static str,
    ty: &'static str,
) -> Result<i64, TriggerParseError> {
    object
        .get(field)
        .ok_or(TriggerParseError::MissingField { ty, field })?
        .as_i64()
        .ok_or(TriggerParseError::MalformedField { field, expected: "an integer" })
}

fn require_millis(
    object: &Map<String, Value>,
    field: &'static str,
    ty: &'static str,
) -> Result<u64, TriggerParseError> {
    object
        .get(field)
        .ok_or(TriggerParseError::MissingField { ty, field })?
        .as_u64()
        .ok_or(TriggerParseError::MalformedField { field, expected: "a non-negative integer" })
}

/// `endTime` accepts epoch milliseconds or an RFC 3339 string. The clock
/// convention is unsigned epoch millis, so pre-epoch instants are rejected.
fn parse_end_time(field: &Value) -> Result<u64, TriggerParseError> {
    match field {
        Value::Number(_) => field.as_u64().ok_or(TriggerParseError::MalformedField {
            field: "endTime",
            expected: "non-negative epoch milliseconds",
        }),
        Value::String(raw) => {
            let instant = chrono::DateTime::parse_from_rfc3339(raw).map_err(|err| {
                TriggerParseError::InvalidTimestamp { field: "endTime", reason: err.to_string() }
            })?;
            u64::try_from(instant.timestamp_millis()).map_err(|_| {
                TriggerParseError::InvalidTimestamp {
                    field: "endTime",
                    reason: "instant predates the unix epoch".to_string(),
                }
            })
        }
        _ => Err(TriggerParseError::MalformedField {
            field: "endTime",
            expected: "epoch milliseconds or an RFC 3339 string",
        }),
    }
}

/// Serde shape of a `request` node; the `type` discriminator and unknown
/// fields are ignored, pattern sources compile afterwards.
#[derive(Debug, Deserialize)]
struct RequestSpec {
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    queries: BTreeMap<String, String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default)]
    body: Option<String>,
}

fn parse_request_matcher(node: &Value) -> Result<RequestMatcher, TriggerParseError> {
    let spec: RequestSpec =
        serde_json::from_value(node.clone()).map_err(TriggerParseError::BadRequestSpec)?;

    let mut matcher = RequestMatcher::new();
    if let Some(method) = spec.method {
        matcher = matcher.method(method);
    }
    if let Some(path) = &spec.path {
        matcher = matcher
            .path(path)
            .map_err(|source| TriggerParseError::InvalidPattern { field: "path".into(), source })?;
    }
    for (name, pattern) in &spec.queries {
        matcher = matcher.query(name, pattern).map_err(|source| {
            TriggerParseError::InvalidPattern { field: format!("query '{name}'"), source }
        })?;
    }
    for (name, pattern) in &spec.headers {
        matcher = matcher.header(name, pattern).map_err(|source| {
            TriggerParseError::InvalidPattern { field: format!("header '{name}'"), source }
        })?;
    }
    if let Some(body) = &spec.body {
        matcher = matcher
            .body(body)
            .map_err(|source| TriggerParseError::InvalidPattern { field: "body".into(), source })?;
    }
    Ok(matcher)
}
