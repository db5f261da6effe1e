//! Test clock — a `Clock` pinned to one instant.

use chrono::{DateTime, TimeZone, Utc};
use untwister_core::clock::Clock;

/// A clock stuck at a single instant, so report timestamps and Unix-time
/// seed windows are stable across test runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock pinned to `seconds` after the Unix epoch.
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is outside chrono's representable range.
    #[must_use]
    pub fn at_unix(seconds: i64) -> Self {
        Self(
            Utc.timestamp_opt(seconds, 0)
                .single()
                .expect("timestamp within chrono's range"),
        )
    }
}

impl Default for FixedClock {
    /// 2026-01-15T10:00:00Z, the instant shared by the workspace's tests.
    fn default() -> Self {
        Self::at_unix(1_768_471_200)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
