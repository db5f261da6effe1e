//! Search configuration.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use untwister_core::clock::Clock;
use untwister_core::error::RecoveryError;

/// Outputs inspected per seed unless configured otherwise.
pub const DEFAULT_DEPTH: usize = 1000;

/// Interval between progress monitor polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(150);

/// Half-width of the Unix-time seed window, in seconds.
pub const ONE_YEAR_SECS: i64 = 31_536_000;

/// How a candidate seed's output stream is lined up with the observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Compare output `k` with observation `k`; the first mismatch ends the
    /// comparison.
    #[default]
    Contiguous,
    /// Draw up to `depth` outputs, advancing through the observations only
    /// on a match. Finds seeds whose generator was already in use before
    /// the observations began.
    Subsequence,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Contiguous => "contiguous",
            Self::Subsequence => "subsequence",
        })
    }
}

impl FromStr for MatchMode {
    type Err = RecoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contiguous" => Ok(Self::Contiguous),
            "subsequence" => Ok(Self::Subsequence),
            other => Err(RecoveryError::InvalidConfiguration(format!(
                "unknown match mode {other:?}, expected \"contiguous\" or \"subsequence\""
            ))),
        }
    }
}

/// Parameters of a brute-force search.
///
/// Seeds are searched over the half-open range
/// `[lower_bound, upper_bound)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchConfig {
    /// First seed searched.
    pub lower_bound: u32,
    /// One past the last seed searched.
    pub upper_bound: u32,
    /// Maximum outputs drawn per seed.
    pub depth: usize,
    /// Worker threads.
    pub workers: usize,
    /// Minimum confidence percentage a candidate must reach to be reported.
    pub minimum_confidence: f64,
    /// Alignment policy between outputs and observations.
    pub match_mode: MatchMode,
    /// Progress monitor poll interval.
    pub poll_interval: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lower_bound: 0,
            upper_bound: u32::MAX,
            depth: DEFAULT_DEPTH,
            workers: available_workers(),
            minimum_confidence: 100.0,
            match_mode: MatchMode::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Hardware parallelism, or 1 if it cannot be determined.
#[must_use]
pub fn available_workers() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

impl SearchConfig {
    /// Checks every numeric input before any work is started.
    ///
    /// # Errors
    ///
    /// Returns `RecoveryError::InvalidConfiguration` for zero workers, zero
    /// depth, a confidence outside `(0, 100]`, or inverted bounds.
    pub fn validate(&self) -> Result<(), RecoveryError> {
        if self.workers == 0 {
            return Err(RecoveryError::InvalidConfiguration(
                "worker count must be at least 1".to_owned(),
            ));
        }
        if self.depth == 0 {
            return Err(RecoveryError::InvalidConfiguration(
                "depth must be at least 1".to_owned(),
            ));
        }
        if !(self.minimum_confidence > 0.0 && self.minimum_confidence <= 100.0) {
            return Err(RecoveryError::InvalidConfiguration(format!(
                "minimum confidence must be in (0, 100], got {}",
                self.minimum_confidence
            )));
        }
        if self.lower_bound > self.upper_bound {
            return Err(RecoveryError::InvalidConfiguration(format!(
                "lower bound {} exceeds upper bound {}",
                self.lower_bound, self.upper_bound
            )));
        }
        Ok(())
    }

    /// Number of seeds in `[lower_bound, upper_bound)`.
    #[must_use]
    pub fn seed_count(&self) -> u32 {
        self.upper_bound.saturating_sub(self.lower_bound)
    }

    /// Restricts the bounds to Unix timestamps within one year of `clock`'s
    /// current time, for generators seeded from the clock.
    #[must_use]
    pub fn with_unix_time_window(mut self, clock: &dyn Clock) -> Self {
        let to_seed = |secs: i64| {
            u32::try_from(secs.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX)
        };
        let timestamp = clock.unix_seconds();
        self.lower_bound = to_seed(timestamp - ONE_YEAR_SECS);
        self.upper_bound = to_seed(timestamp + ONE_YEAR_SECS);
        self
    }
}
