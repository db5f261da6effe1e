//! Parallel brute-force seed search.
//!
//! The seed range is partitioned across worker threads. Every worker builds
//! its own generator through the factory, replays each seed in its range
//! against the observations and keeps the seeds that reach the confidence
//! threshold. A full match cancels the shared token so the other workers
//! stop at their next seed boundary.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, instrument};
use untwister_core::error::RecoveryError;
use untwister_core::factory::GeneratorFactory;
use untwister_core::prng::Prng;
use untwister_core::sequence::ObservedSequence;

use crate::cancel::CancellationToken;
use crate::config::{MatchMode, SearchConfig};
use crate::partition::{WorkRange, partition};
use crate::progress::{ProgressBoard, ProgressMonitor, ProgressObserver};

/// A seed together with the share of observations it reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeedCandidate {
    /// Candidate seed.
    pub seed: u32,
    /// Percentage of observed values matched, in `[0, 100]`.
    pub confidence: f64,
}

impl SeedCandidate {
    /// Whether every observed value was reproduced.
    #[must_use]
    pub fn is_full_match(&self) -> bool {
        self.confidence >= 100.0
    }
}

/// Result of a brute-force search.
#[derive(Debug, Clone, Serialize)]
pub struct BruteForceOutcome {
    /// Generator searched.
    pub generator: String,
    /// Qualifying candidates, highest confidence first.
    pub candidates: Vec<SeedCandidate>,
    /// Seeds evaluated before the search ended.
    pub seeds_evaluated: u64,
    /// Seeds in the configured range.
    pub seeds_total: u64,
    /// Whether a full match ended the search before the range was exhausted.
    pub stopped_early: bool,
    /// Wall-clock duration of the search.
    pub elapsed: Duration,
}

impl BruteForceOutcome {
    /// Highest-confidence candidate, if any.
    #[must_use]
    pub fn best(&self) -> Option<&SeedCandidate> {
        self.candidates.first()
    }
}

/// Confidence percentage for `matches` out of `observed` values.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn confidence(matches: usize, observed: usize) -> f64 {
    matches as f64 / observed as f64 * 100.0
}

/// Reseeds `generator` with `seed` and counts the observations its output
/// stream reproduces under `mode`, drawing at most `depth` outputs.
pub fn count_matches(
    generator: &mut dyn Prng,
    seed: u32,
    observed: &[u32],
    depth: usize,
    mode: MatchMode,
) -> usize {
    generator.seed(seed);
    match mode {
        MatchMode::Contiguous => observed
            .iter()
            .take(depth)
            .take_while(|&&value| generator.random() == value)
            .count(),
        MatchMode::Subsequence => {
            let mut matches = 0;
            for _ in 0..depth {
                if generator.random() == observed[matches] {
                    matches += 1;
                    if matches == observed.len() {
                        break;
                    }
                }
            }
            matches
        }
    }
}

/// Everything one worker needs, borrowed from the spawning scope.
struct Worker<'a> {
    id: usize,
    range: WorkRange,
    factory: &'a dyn GeneratorFactory,
    generator: &'a str,
    observed: &'a [u32],
    config: &'a SearchConfig,
    board: &'a ProgressBoard,
    cancel: &'a CancellationToken,
}

impl Worker<'_> {
    fn run(&self) -> Result<Vec<SeedCandidate>, RecoveryError> {
        let mut generator = self.factory.instantiate(self.generator)?;
        let mut candidates = Vec::new();
        debug!(
            worker = self.id,
            start = self.range.start,
            end = self.range.end,
            "worker started"
        );

        for (processed, seed) in (1u64..).zip(self.range.seeds()) {
            let matches = count_matches(
                generator.as_mut(),
                seed,
                self.observed,
                self.config.depth,
                self.config.match_mode,
            );
            if self.cancel.is_cancelled() {
                break;
            }
            self.board.record(self.id, processed);

            let confidence = confidence(matches, self.observed.len());
            if confidence >= self.config.minimum_confidence {
                candidates.push(SeedCandidate { seed, confidence });
            }
            if matches == self.observed.len() {
                info!(worker = self.id, seed, "full match found");
                self.cancel.cancel();
            }
        }

        debug!(worker = self.id, found = candidates.len(), "worker stopped");
        Ok(candidates)
    }

    /// Runs the worker, turning a panic into an error and cancelling the
    /// other workers on any failure.
    fn run_guarded(&self) -> Result<Vec<SeedCandidate>, RecoveryError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.run())).unwrap_or_else(
            |payload| {
                Err(RecoveryError::WorkerFailed {
                    worker: self.id,
                    message: panic_message(payload.as_ref()),
                })
            },
        );
        if result.is_err() {
            self.cancel.cancel();
        }
        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker panicked".to_owned())
}

/// Searches `[config.lower_bound, config.upper_bound)` for seeds of
/// `generator` that reproduce `observed`.
///
/// Configuration and the generator name are checked before any thread is
/// spawned. An exhausted range with no candidates is a normal outcome, not
/// an error.
///
/// # Errors
///
/// Returns `RecoveryError::InvalidConfiguration` or
/// `RecoveryError::UnknownGenerator` before searching, and
/// `RecoveryError::WorkerFailed` if a worker cannot start or panics.
#[instrument(
    skip(factory, observed, config, observer),
    fields(seeds = config.seed_count(), workers = config.workers)
)]
pub fn brute_force(
    factory: &dyn GeneratorFactory,
    generator: &str,
    observed: &ObservedSequence,
    config: &SearchConfig,
    observer: &dyn ProgressObserver,
) -> Result<BruteForceOutcome, RecoveryError> {
    config.validate()?;
    factory.instantiate(generator)?;

    let ranges = partition(config.seed_count(), config.workers)?
        .into_iter()
        .map(|range| range.offset(config.lower_bound))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|range| !range.is_empty())
        .collect::<Vec<_>>();

    let board = ProgressBoard::new(ranges.len(), u64::from(config.seed_count()));
    let cancel = CancellationToken::new();
    info!(
        workers = ranges.len(),
        lower = config.lower_bound,
        upper = config.upper_bound,
        depth = config.depth,
        "spawning search workers"
    );

    let started = Instant::now();
    let results = thread::scope(|scope| {
        let monitor_thread = thread::current();
        let handles: Vec<ScopedJoinHandle<'_, _>> = ranges
            .iter()
            .enumerate()
            .map(|(id, &range)| {
                let worker = Worker {
                    id,
                    range,
                    factory,
                    generator,
                    observed: observed.as_slice(),
                    config,
                    board: &board,
                    cancel: &cancel,
                };
                let waker = monitor_thread.clone();
                scope.spawn(move || {
                    let result = worker.run_guarded();
                    waker.unpark();
                    result
                })
            })
            .collect();

        let monitor = ProgressMonitor::new(&board, &cancel, config.poll_interval, observer);
        monitor.run(|| handles.iter().all(ScopedJoinHandle::is_finished));

        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle.join().unwrap_or_else(|payload| {
                    Err(RecoveryError::WorkerFailed {
                        worker,
                        message: panic_message(payload.as_ref()),
                    })
                })
            })
            .collect::<Vec<_>>()
    });
    let elapsed = started.elapsed();

    let mut candidates = Vec::new();
    for result in results {
        candidates.extend(result?);
    }
    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then(a.seed.cmp(&b.seed))
    });

    let seeds_evaluated = board.processed();
    let outcome = BruteForceOutcome {
        generator: generator.to_owned(),
        candidates,
        seeds_evaluated,
        seeds_total: board.total(),
        stopped_early: seeds_evaluated < board.total(),
        elapsed,
    };
    info!(
        found = outcome.candidates.len(),
        evaluated = outcome.seeds_evaluated,
        elapsed_secs = outcome.elapsed.as_secs_f64(),
        "brute force finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use untwister_test_support::CountingPrng;

    use super::*;

    #[test]
    fn test_contiguous_counts_prefix_only() {
        let mut prng = CountingPrng::new(1);
        // Seed 10 yields 11, 12, 13, ...
        assert_eq!(
            count_matches(&mut prng, 10, &[11, 12, 99, 14], 100, MatchMode::Contiguous),
            2
        );
    }

    #[test]
    fn test_contiguous_respects_depth() {
        let mut prng = CountingPrng::new(1);
        assert_eq!(
            count_matches(&mut prng, 10, &[11, 12, 13, 14], 3, MatchMode::Contiguous),
            3
        );
    }

    #[test]
    fn test_subsequence_skips_unobserved_outputs() {
        let mut prng = CountingPrng::new(1);
        assert_eq!(
            count_matches(&mut prng, 0, &[5, 9, 20], 30, MatchMode::Subsequence),
            3
        );
        assert_eq!(
            count_matches(&mut prng, 0, &[5, 9, 20], 10, MatchMode::Subsequence),
            2
        );
    }

    #[test]
    fn test_confidence_is_a_percentage() {
        assert!((confidence(1, 4) - 25.0).abs() < f64::EPSILON);
        assert!((confidence(4, 4) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_panic_message_extracts_text() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7);
        assert_eq!(panic_message(payload.as_ref()), "worker panicked");
    }
}
