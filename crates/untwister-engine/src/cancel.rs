//! Cooperative cancellation shared by search workers.

use std::sync::atomic::{AtomicBool, Ordering};

/// One-way stop signal polled by workers at every seed boundary.
///
/// Only a bounded delay before workers notice matters, so relaxed ordering
/// is enough; no data is published through the flag.
#[derive(Debug, Default)]
pub struct CancellationToken {
    cancelled: AtomicBool,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals every observer to stop. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_visible_across_threads() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        std::thread::scope(|scope| {
            scope.spawn(|| token.cancel());
        });
        assert!(token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }
}
