//! Recovery error types.

use thiserror::Error;

/// Top-level error type for seed and state recovery.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The requested generator is not registered.
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    /// Fewer observations than the algorithm needs.
    #[error("insufficient data: need at least {required} observed values, got {available}")]
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations supplied.
        available: usize,
    },

    /// A numeric input is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The whole search space was explored without a qualifying candidate.
    #[error("no seed found for {generator} after searching {seeds_searched} seeds")]
    NoMatchFound {
        /// Generator that was searched.
        generator: String,
        /// Number of seeds evaluated.
        seeds_searched: u64,
    },

    /// A generator implementation broke its capability contract.
    #[error("generator {generator} violated its contract: {message}")]
    ContractViolation {
        /// Offending generator.
        generator: String,
        /// What went wrong.
        message: String,
    },

    /// A search worker could not start or panicked.
    #[error("worker {worker} failed: {message}")]
    WorkerFailed {
        /// Index of the failed worker.
        worker: usize,
        /// Failure description.
        message: String,
    },
}
