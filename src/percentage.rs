//! Probabilistic activation for a percentage of requests.

use crate::env::Env;
use crate::random::{RandomSource, ThreadLocalRandom};
use crate::request::Request;
use crate::trigger::Trigger;
use std::sync::Arc;

/// Percentage applied when the configured environment key is unset or
/// unparsable.
pub const DEFAULT_PERCENTAGE: i64 = 50;

/// Trigger that activates for roughly `percentage` percent of requests.
///
/// Each evaluation draws an integer in `[0, 100)` and activates iff
/// `draw <= percentage`. The boundary is inclusive, so `percentage = 0`
/// still activates on a draw of 0 (roughly 1% of requests). Values outside
/// `[0, 100]` are not clamped: anything negative never activates, anything
/// at or above 100 always activates.
#[derive(Debug, Clone)]
pub struct PercentageTrigger {
    percentage: i64,
    source: Arc<dyn RandomSource>,
}

impl PercentageTrigger {
    /// Trigger drawing from the thread-local RNG.
    pub fn new(percentage: i64) -> Self {
        Self::with_source(percentage, Arc::new(ThreadLocalRandom))
    }

    /// Trigger drawing from a caller-supplied source (deterministic tests).
    pub fn with_source(percentage: i64, source: Arc<dyn RandomSource>) -> Self {
        Self { percentage, source }
    }

    /// Read the percentage from an environment-style lookup, falling back to
    /// [`DEFAULT_PERCENTAGE`] when `key` is unset or does not parse.
    pub fn from_env(env: &dyn Env, key: &str) -> Self {
        let percentage = match env.get(key) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(
                        key,
                        %raw,
                        default = DEFAULT_PERCENTAGE,
                        "unparsable percentage in environment, using default"
                    );
                    DEFAULT_PERCENTAGE
                }
            },
            None => {
                tracing::debug!(
                    key,
                    default = DEFAULT_PERCENTAGE,
                    "percentage not set in environment, using default"
                );
                DEFAULT_PERCENTAGE
            }
        };
        Self::new(percentage)
    }

    /// The configured percentage, as supplied (never clamped).
    pub fn percentage(&self) -> i64 {
        self.percentage
    }
}

impl Trigger for PercentageTrigger {
    fn evaluate(&self, _request: &dyn Request) -> bool {
        let draw = i64::try_from(self.source.next_below(100)).unwrap_or(i64::MAX);
        draw <= self.percentage
    }

    fn description(&self) -> String {
        format!("{}% of requests", self.percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use crate::random::SequenceSource;
    use crate::request::RequestParts;

    fn probe() -> RequestParts {
        RequestParts::new("GET", "/")
    }

    fn with_draws(percentage: i64, draws: Vec<u64>) -> PercentageTrigger {
        PercentageTrigger::with_source(percentage, Arc::new(SequenceSource::new(draws)))
    }

    #[test]
    fn activates_iff_draw_is_at_or_below_the_percentage() {
        let req = probe();
        let trigger = with_draws(30, vec![29, 30, 31]);

        assert!(trigger.evaluate(&req));
        assert!(trigger.evaluate(&req)); // boundary is inclusive
        assert!(!trigger.evaluate(&req));
    }

    #[test]
    fn zero_percent_still_fires_on_a_draw_of_zero() {
        let req = probe();
        let trigger = with_draws(0, vec![0, 1]);

        assert!(trigger.evaluate(&req));
        assert!(!trigger.evaluate(&req));
    }

    #[test]
    fn negative_percentage_never_activates() {
        let req = probe();
        let trigger = PercentageTrigger::new(-1);
        for _ in 0..200 {
            assert!(!trigger.evaluate(&req));
        }
    }

    #[test]
    fn hundred_or_more_always_activates() {
        let req = probe();
        for percentage in [100, 150] {
            let trigger = PercentageTrigger::new(percentage);
            for _ in 0..200 {
                assert!(trigger.evaluate(&req));
            }
        }
    }

    #[test]
    fn from_env_reads_the_configured_key() {
        let env = MapEnv::new().with("CHAOS_PERCENTAGE", "25");
        let trigger = PercentageTrigger::from_env(&env, "CHAOS_PERCENTAGE");
        assert_eq!(trigger.percentage(), 25);
    }

    #[test]
    fn from_env_falls_back_when_unset_or_unparsable() {
        let empty = MapEnv::new();
        assert_eq!(
            PercentageTrigger::from_env(&empty, "CHAOS_PERCENTAGE").percentage(),
            DEFAULT_PERCENTAGE
        );

        let garbage = MapEnv::new().with("CHAOS_PERCENTAGE", "ghost");
        assert_eq!(
            PercentageTrigger::from_env(&garbage, "CHAOS_PERCENTAGE").percentage(),
            DEFAULT_PERCENTAGE
        );
    }

    #[test]
    fn describes_the_configured_percentage() {
        assert_eq!(PercentageTrigger::new(25).description(), "25% of requests");
        assert_eq!(PercentageTrigger::new(-1).description(), "-1% of requests");
    }
}
