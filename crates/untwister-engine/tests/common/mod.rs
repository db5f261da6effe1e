//! Shared helpers for engine integration tests.
#![allow(dead_code)]

use std::time::Duration;

use untwister_core::factory::GeneratorFactory;
use untwister_core::sequence::ObservedSequence;
use untwister_engine::config::{MatchMode, SearchConfig};
use untwister_prngs::GeneratorRegistry;
use untwister_test_support::FixedClock;

/// Fixed timestamp used across engine tests.
pub fn fixed_clock() -> FixedClock {
    FixedClock::default()
}

/// A contiguous-match config over `[lower, upper)` with a fast monitor.
pub fn search_config(lower: u32, upper: u32, workers: usize) -> SearchConfig {
    SearchConfig {
        lower_bound: lower,
        upper_bound: upper,
        depth: 1000,
        workers,
        minimum_confidence: 100.0,
        match_mode: MatchMode::Contiguous,
        poll_interval: Duration::from_millis(1),
    }
}

/// The first `count` outputs of the registered generator `name` seeded with
/// `seed`, after discarding `skip` outputs.
pub fn outputs(name: &str, seed: u32, skip: usize, count: usize) -> Vec<u32> {
    let mut generator = GeneratorRegistry::new().instantiate(name).unwrap();
    generator.seed(seed);
    for _ in 0..skip {
        generator.random();
    }
    (0..count).map(|_| generator.random()).collect()
}

/// Wraps values in an `ObservedSequence`.
pub fn observed(values: Vec<u32>) -> ObservedSequence {
    ObservedSequence::new(values).unwrap()
}
