//! Random-number source abstraction
//!
//! Enables deterministic tests of probabilistic triggers without seeding a
//! global RNG.

use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Source of uniformly distributed integers in a bounded range.
pub trait RandomSource: Send + Sync + std::fmt::Debug {
    /// Uniform integer in `[0, bound)`. A zero bound yields 0.
    fn next_below(&self, bound: u64) -> u64;
}

/// Production source using `rand`'s thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadLocalRandom;

impl RandomSource for ThreadLocalRandom {
    fn next_below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        rand::rng().random_range(0..bound)
    }
}

/// Deterministic source that cycles through a fixed sequence of draws.
///
/// Draws are taken modulo the requested bound. Clones share the cursor.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    draws: Arc<Vec<u64>>,
    cursor: Arc<AtomicUsize>,
}

impl SequenceSource {
    /// Panics if `draws` is empty.
    pub fn new(draws: Vec<u64>) -> Self {
        assert!(!draws.is_empty(), "SequenceSource needs at least one draw");
        Self { draws: Arc::new(draws), cursor: Arc::new(AtomicUsize::new(0)) }
    }
}

impl RandomSource for SequenceSource {
    fn next_below(&self, bound: u64) -> u64 {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        let draw = self.draws[index % self.draws.len()];
        if bound == 0 {
            0
        } else {
            draw % bound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_local_random_stays_below_the_bound() {
        let source = ThreadLocalRandom;
        for _ in 0..1000 {
            assert!(source.next_below(100) < 100);
        }
    }

    #[test]
    fn zero_bound_yields_zero() {
        assert_eq!(ThreadLocalRandom.next_below(0), 0);
        assert_eq!(SequenceSource::new(vec![7]).next_below(0), 0);
    }

    #[test]
    fn sequence_source_cycles_in_order() {
        let source = SequenceSource::new(vec![3, 99, 0]);
        assert_eq!(source.next_below(100), 3);
        assert_eq!(source.next_below(100), 99);
        assert_eq!(source.next_below(100), 0);
        assert_eq!(source.next_below(100), 3);
    }

    #[test]
    fn sequence_source_wraps_draws_into_the_bound() {
        let source = SequenceSource::new(vec![105]);
        assert_eq!(source.next_below(100), 5);
    }
}
