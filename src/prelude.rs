//! Convenient re-exports for common Poltergeist types.
pub use crate::{
    algebra::Gate,
    clock::{Clock, ManualClock, SystemClock},
    config::{parse_trigger, parse_trigger_str, TriggerParseError},
    countdown::CountdownTrigger,
    env::{Env, MapEnv, ProcessEnv},
    matcher::RequestMatcher,
    once::OnceTrigger,
    percentage::{PercentageTrigger, DEFAULT_PERCENTAGE},
    random::{RandomSource, SequenceSource, ThreadLocalRandom},
    request::{Request, RequestParts},
    timing::{DeadlineTrigger, DelayTrigger},
    trigger::{AlwaysTrigger, AndTrigger, NotTrigger, OrTrigger, Trigger, TriggerExt},
};
