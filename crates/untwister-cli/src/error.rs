//! Untwister CLI — error types.

use thiserror::Error;
use untwister_core::error::RecoveryError;

/// Startup and runtime errors for the `untwister` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable or input line is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The observation file could not be read.
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),

    /// Recovery failed or was misconfigured.
    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    /// The report could not be rendered.
    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}

impl AppError {
    /// Exit status the binary reports for this error. A search that
    /// finished without a candidate is distinguished from a failed run.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Recovery(RecoveryError::NoMatchFound { .. }) => 1,
            Self::Config(_) | Self::Recovery(RecoveryError::InvalidConfiguration(_)) => 2,
            _ => 3,
        }
    }
}
