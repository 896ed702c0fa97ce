//! Environment lookup seam for configuration-derived triggers.

use std::collections::HashMap;

/// Key/value lookup abstraction over environment-style configuration.
pub trait Env: Send + Sync + std::fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment (`std::env::var`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory lookup for deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key/value pair.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Env for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_env_returns_inserted_values() {
        let env = MapEnv::new().with("CHAOS_PERCENTAGE", "25");
        assert_eq!(env.get("CHAOS_PERCENTAGE").as_deref(), Some("25"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn process_env_reads_real_variables() {
        std::env::set_var("POLTERGEIST_ENV_TEST", "ghost");
        assert_eq!(ProcessEnv.get("POLTERGEIST_ENV_TEST").as_deref(), Some("ghost"));
        assert_eq!(ProcessEnv.get("POLTERGEIST_ENV_TEST_MISSING"), None);
    }
}
