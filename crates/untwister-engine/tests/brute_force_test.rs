//! Integration tests for the parallel brute-force search.

mod common;

use std::collections::BTreeSet;

use rand::Rng;
use untwister_core::error::RecoveryError;
use untwister_engine::brute_force::{SeedCandidate, brute_force};
use untwister_engine::config::{MatchMode, SearchConfig};
use untwister_engine::progress::TracingProgress;
use untwister_prngs::GeneratorRegistry;
use untwister_test_support::{CountingPrng, MockFactory};

use common::{observed, outputs, search_config};

#[test]
fn test_lcg_seed_42_is_the_only_candidate() {
    let observed = observed(outputs("lcg32", 42, 0, 20));
    let config = SearchConfig {
        depth: 20,
        ..search_config(0, 1000, 4)
    };

    let outcome = brute_force(
        &GeneratorRegistry::new(),
        "lcg32",
        &observed,
        &config,
        &TracingProgress,
    )
    .unwrap();

    assert_eq!(
        outcome.candidates,
        vec![SeedCandidate {
            seed: 42,
            confidence: 100.0
        }]
    );
    assert!(outcome.seeds_evaluated <= 1000);
}

#[test]
fn test_secret_seed_is_found_with_full_confidence() {
    let secret: u32 = rand::rng().random_range(0..200_000);
    let observed = observed(CountingPrng::stream(secret, 16));
    let factory = MockFactory::counting(1);

    let outcome = brute_force(
        &factory,
        CountingPrng::NAME,
        &observed,
        &search_config(0, 200_000, 8),
        &TracingProgress,
    )
    .unwrap();

    assert_eq!(
        outcome.candidates,
        vec![SeedCandidate {
            seed: secret,
            confidence: 100.0
        }]
    );
    assert!(outcome.seeds_evaluated <= outcome.seeds_total);
    assert_eq!(outcome.seeds_total, 200_000);
}

#[test]
fn test_full_match_stops_other_workers_early() {
    let observed = observed(CountingPrng::stream(1_000, 8));
    let factory = MockFactory::counting(1);

    let outcome = brute_force(
        &factory,
        CountingPrng::NAME,
        &observed,
        &search_config(0, 400_000_000, 4),
        &TracingProgress,
    )
    .unwrap();

    assert_eq!(outcome.best().map(|c| c.seed), Some(1_000));
    assert!(outcome.stopped_early);
    assert!(outcome.seeds_evaluated < outcome.seeds_total / 2);
}

#[test]
fn test_empty_range_yields_no_candidates() {
    let observed = observed(outputs("lcg32", 7, 0, 5));

    let outcome = brute_force(
        &GeneratorRegistry::new(),
        "lcg32",
        &observed,
        &search_config(500, 500, 4),
        &TracingProgress,
    )
    .unwrap();

    assert!(outcome.candidates.is_empty());
    assert_eq!(outcome.seeds_evaluated, 0);
    assert!(!outcome.stopped_early);
}

#[test]
fn test_lowering_confidence_never_shrinks_results() {
    let observed = observed(vec![5, 7, 12, 30]);
    let factory = MockFactory::counting(1);

    let mut previous: BTreeSet<u32> = BTreeSet::new();
    for threshold in [100.0, 75.0, 50.0, 25.0, 1.0] {
        let config = SearchConfig {
            depth: 10,
            minimum_confidence: threshold,
            match_mode: MatchMode::Subsequence,
            ..search_config(0, 40, 3)
        };
        let outcome = brute_force(&factory, CountingPrng::NAME, &observed, &config, &TracingProgress)
            .unwrap();
        let seeds: BTreeSet<u32> = outcome.candidates.iter().map(|c| c.seed).collect();

        assert!(previous.is_subset(&seeds), "threshold {threshold}");
        assert!(outcome.candidates.iter().all(|c| c.confidence >= threshold));
        previous = seeds;
    }
    assert!(!previous.is_empty());
}

#[test]
fn test_candidates_are_sorted_by_confidence() {
    let observed = observed(vec![5, 7, 12, 30]);
    let config = SearchConfig {
        depth: 10,
        minimum_confidence: 25.0,
        match_mode: MatchMode::Subsequence,
        ..search_config(0, 40, 4)
    };

    let outcome = brute_force(
        &MockFactory::counting(1),
        CountingPrng::NAME,
        &observed,
        &config,
        &TracingProgress,
    )
    .unwrap();

    assert!(
        outcome
            .candidates
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence)
    );
}

#[test]
fn test_unproducible_sequence_reports_only_partial_matches() {
    let observed = observed(vec![1, 2, 3, 4]);
    let config = SearchConfig {
        minimum_confidence: 50.0,
        ..search_config(0, 5_000, 4)
    };

    let outcome = brute_force(
        &GeneratorRegistry::new(),
        "lcg32",
        &observed,
        &config,
        &TracingProgress,
    )
    .unwrap();

    assert!(
        outcome
            .candidates
            .iter()
            .all(|c| (50.0..100.0).contains(&c.confidence))
    );
    assert_eq!(outcome.seeds_evaluated, 5_000);
}

#[test]
fn test_subsequence_mode_finds_seed_of_used_generator() {
    // The application drew five values before the observed ones.
    let observed = observed(outputs("glibc-rand", 777, 5, 10));
    let registry = GeneratorRegistry::new();

    let contiguous =
        brute_force(&registry, "glibc-rand", &observed, &search_config(700, 800, 2), &TracingProgress)
            .unwrap();
    assert!(contiguous.candidates.is_empty());

    let config = SearchConfig {
        depth: 50,
        match_mode: MatchMode::Subsequence,
        ..search_config(700, 800, 2)
    };
    let subsequence =
        brute_force(&registry, "glibc-rand", &observed, &config, &TracingProgress).unwrap();
    assert_eq!(
        subsequence.best(),
        Some(&SeedCandidate {
            seed: 777,
            confidence: 100.0
        })
    );
}

#[test]
fn test_each_worker_gets_its_own_generator() {
    let observed = observed(vec![0, 0, 0]);
    let factory = MockFactory::counting(1);

    brute_force(
        &factory,
        CountingPrng::NAME,
        &observed,
        &search_config(0, 1_000, 4),
        &TracingProgress,
    )
    .unwrap();

    // One lookup before spawning, then one instance per worker.
    assert_eq!(factory.instantiations(), 5);
}

#[test]
fn test_unknown_generator_fails_before_spawning() {
    let observed = observed(vec![1, 2, 3]);
    let factory = MockFactory::counting(1);

    let result = brute_force(
        &factory,
        "xorshift",
        &observed,
        &search_config(0, 100, 2),
        &TracingProgress,
    );

    assert!(matches!(result, Err(RecoveryError::UnknownGenerator(name)) if name == "xorshift"));
    assert_eq!(factory.instantiations(), 0);
}

#[test]
fn test_invalid_configuration_fails_before_spawning() {
    let observed = observed(vec![1, 2, 3]);
    let factory = MockFactory::counting(1);
    let config = SearchConfig {
        minimum_confidence: 0.0,
        ..search_config(0, 100, 2)
    };

    let result = brute_force(&factory, CountingPrng::NAME, &observed, &config, &TracingProgress);

    assert!(matches!(result, Err(RecoveryError::InvalidConfiguration(_))));
    assert_eq!(factory.instantiations(), 0);
}

#[test]
fn test_panicking_worker_is_reported() {
    let observed = observed(vec![1, 2, 3]);

    let result = brute_force(
        &MockFactory::panicking(),
        "panicking",
        &observed,
        &search_config(0, 100, 2),
        &TracingProgress,
    );

    match result {
        Err(RecoveryError::WorkerFailed { message, .. }) => {
            assert!(message.contains("PanickingPrng::random called"));
        }
        other => panic!("expected WorkerFailed, got {other:?}"),
    }
}

#[test]
fn test_search_returns_without_waiting_out_the_poll_interval() {
    let observed = observed(vec![0, 0, 0]);
    let config = SearchConfig {
        poll_interval: std::time::Duration::from_secs(60),
        ..search_config(0, 1_000, 2)
    };
    let wall = std::time::Instant::now();

    let outcome = brute_force(
        &MockFactory::counting(1),
        CountingPrng::NAME,
        &observed,
        &config,
        &TracingProgress,
    )
    .unwrap();

    let waited = wall.elapsed();
    assert!(waited < std::time::Duration::from_secs(30));
    assert!(outcome.elapsed <= waited);
    assert_eq!(outcome.seeds_evaluated, 1_000);
}
