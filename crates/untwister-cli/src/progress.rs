//! Progress line printed to stderr while a search runs.

use std::io::Write;

use untwister_engine::progress::{ProgressObserver, ProgressSnapshot};

/// Renders one progress line.
#[must_use]
pub fn progress_line(snapshot: &ProgressSnapshot) -> String {
    format!(
        "[{:6.2}%] {}/{} seeds, {}s elapsed",
        snapshot.percent,
        snapshot.processed,
        snapshot.total,
        snapshot.elapsed.as_secs()
    )
}

/// Overwrites a single stderr line on every poll.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        let mut stderr = std::io::stderr().lock();
        // Progress output is best effort.
        let _ = write!(stderr, "\r{}", progress_line(snapshot));
        let _ = stderr.flush();
    }

    fn on_finish(&self, snapshot: &ProgressSnapshot) {
        let _ = writeln!(std::io::stderr().lock(), "\r{}", progress_line(snapshot));
    }
}
