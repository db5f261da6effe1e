//! Wall-clock source for report timestamps and time-seeded search windows.

use chrono::{DateTime, Utc};

/// Supplies "now" to the recovery driver and to the Unix-time seed window,
/// so both are reproducible under a fixed clock.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current instant as whole seconds since the Unix epoch, the value an
    /// application would have passed to `srand(time(NULL))`.
    fn unix_seconds(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
