//! Observation file parsing.

use std::path::Path;

use tracing::info;
use untwister_core::sequence::ObservedSequence;

use crate::error::AppError;

/// Parses newline-separated decimal `u32` values. Blank lines are skipped.
///
/// # Errors
///
/// Returns `AppError::Config` naming the first line that is not a `u32`.
pub fn parse_observations(text: &str) -> Result<Vec<u32>, AppError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| {
            line.parse().map_err(|e| {
                AppError::Config(format!("input line {number}: {line:?} is not a u32: {e}"))
            })
        })
        .collect()
}

/// Reads and parses the observation file at `path`.
///
/// # Errors
///
/// Returns `AppError::Input` if the file cannot be read, `AppError::Config`
/// for a malformed line, and `AppError::Recovery` if it holds no values.
pub fn read_observations(path: &Path) -> Result<ObservedSequence, AppError> {
    let text = std::fs::read_to_string(path)?;
    let observed = ObservedSequence::new(parse_observations(&text)?)?;
    info!(path = %path.display(), count = observed.len(), "loaded observations");
    Ok(observed)
}
