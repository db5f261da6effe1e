//! Search progress tracking.
//!
//! Each worker owns one slot of a [`ProgressBoard`] and overwrites it with
//! the number of seeds it has evaluated. The [`ProgressMonitor`] polls the
//! board from the spawning thread, so workers never wait on it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::cancel::CancellationToken;

/// Per-worker progress counters.
#[derive(Debug)]
pub struct ProgressBoard {
    slots: Vec<AtomicU64>,
    total: u64,
}

impl ProgressBoard {
    /// Creates a board with one zeroed slot per worker for a search over
    /// `total` seeds.
    #[must_use]
    pub fn new(workers: usize, total: u64) -> Self {
        Self {
            slots: (0..workers).map(|_| AtomicU64::new(0)).collect(),
            total,
        }
    }

    /// Records that `worker` has evaluated `processed` seeds. Only the owning
    /// worker writes its slot.
    pub fn record(&self, worker: usize, processed: u64) {
        self.slots[worker].store(processed, Ordering::Relaxed);
    }

    /// Seeds evaluated across all workers.
    pub fn processed(&self) -> u64 {
        self.slots.iter().map(|slot| slot.load(Ordering::Relaxed)).sum()
    }

    /// Seeds the search covers.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Percentage of the range evaluated. An empty range is complete.
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed() as f64 / self.total as f64 * 100.0
    }
}

/// Point-in-time view of a running search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// Percentage of the range evaluated.
    pub percent: f64,
    /// Seeds evaluated.
    pub processed: u64,
    /// Seeds in the range.
    pub total: u64,
    /// Wall-clock time since the search started.
    pub elapsed: Duration,
}

/// Receives progress snapshots from the monitor.
pub trait ProgressObserver {
    /// Called on every poll.
    fn on_progress(&self, snapshot: &ProgressSnapshot);

    /// Called once when the monitor stops.
    fn on_finish(&self, _snapshot: &ProgressSnapshot) {}
}

/// Observer that logs snapshots at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        debug!(
            percent = snapshot.percent,
            processed = snapshot.processed,
            total = snapshot.total,
            elapsed_secs = snapshot.elapsed.as_secs(),
            "search progress"
        );
    }
}

/// Polls a [`ProgressBoard`] until the search is over.
pub struct ProgressMonitor<'a> {
    board: &'a ProgressBoard,
    cancel: &'a CancellationToken,
    interval: Duration,
    observer: &'a dyn ProgressObserver,
    started: Instant,
}

impl<'a> ProgressMonitor<'a> {
    /// Creates a monitor; elapsed time is measured from this call.
    pub fn new(
        board: &'a ProgressBoard,
        cancel: &'a CancellationToken,
        interval: Duration,
        observer: &'a dyn ProgressObserver,
    ) -> Self {
        Self {
            board,
            cancel,
            interval,
            observer,
            started: Instant::now(),
        }
    }

    /// Current snapshot of the board.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            percent: self.board.percent(),
            processed: self.board.processed(),
            total: self.board.total(),
            elapsed: self.started.elapsed(),
        }
    }

    /// Polls until the token is cancelled, the whole range is covered, or
    /// `workers_finished` reports that no worker is left running. Reaching
    /// full coverage cancels the token.
    ///
    /// Between polls the calling thread parks for at most the interval, so
    /// a worker that unparks it on exit ends the wait early.
    pub fn run(&self, workers_finished: impl Fn() -> bool) -> ProgressSnapshot {
        loop {
            let snapshot = self.snapshot();
            self.observer.on_progress(&snapshot);

            if snapshot.percent >= 100.0 {
                self.cancel.cancel();
            }
            if self.cancel.is_cancelled() || workers_finished() {
                self.observer.on_finish(&snapshot);
                return snapshot;
            }
            thread::park_timeout(self.interval);
        }
    }
}
