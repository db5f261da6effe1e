//! Recovery driver: state inference first, brute force as the fallback.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};
use untwister_core::clock::Clock;
use untwister_core::error::RecoveryError;
use untwister_core::factory::GeneratorFactory;
use untwister_core::sequence::ObservedSequence;

use crate::brute_force::{BruteForceOutcome, brute_force};
use crate::config::SearchConfig;
use crate::inference::{InferenceOutcome, infer_state};
use crate::progress::ProgressObserver;

/// How the generator was recovered.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Recovery {
    /// State inference found a window explaining every observation.
    Inferred {
        /// The perfect inference result.
        outcome: InferenceOutcome,
    },
    /// Brute force found at least one candidate seed.
    BruteForced {
        /// The search result.
        outcome: BruteForceOutcome,
        /// Inference's best guess, if inference could run.
        inference: Option<InferenceOutcome>,
    },
    /// Brute force covered its range without a candidate. Inference's best
    /// guess, if any, is the only lead left.
    Exhausted {
        /// The empty search result.
        outcome: BruteForceOutcome,
        /// Inference's best guess, if inference could run.
        inference: Option<InferenceOutcome>,
    },
}

/// Structured report of a recovery run.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryReport {
    /// Generator attacked.
    pub generator: String,
    /// Number of observed values.
    pub observed: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// The result.
    pub recovery: Recovery,
}

impl RecoveryReport {
    /// `RecoveryError::NoMatchFound` if the search came up empty, for
    /// callers that treat an exhausted range as a failed run.
    #[must_use]
    pub fn no_match(&self) -> Option<RecoveryError> {
        match &self.recovery {
            Recovery::Exhausted { outcome, .. } => Some(RecoveryError::NoMatchFound {
                generator: self.generator.clone(),
                seeds_searched: outcome.seeds_evaluated,
            }),
            Recovery::Inferred { .. } | Recovery::BruteForced { .. } => None,
        }
    }
}

/// Recovers `generator` from `observed`.
///
/// Inference runs first because it is cheap and needs no seed guessing.
/// Anything short of a perfect window falls through to the brute-force
/// search, as do observations too few for inference.
///
/// # Errors
///
/// Returns configuration and lookup errors before any work starts, and any
/// contract or worker failure from either algorithm. An exhausted range is
/// reported as `Recovery::Exhausted`, keeping inference's best guess.
#[instrument(skip(factory, observed, config, observer, clock))]
pub fn recover(
    factory: &dyn GeneratorFactory,
    generator: &str,
    observed: &ObservedSequence,
    config: &SearchConfig,
    observer: &dyn ProgressObserver,
    clock: &dyn Clock,
) -> Result<RecoveryReport, RecoveryError> {
    config.validate()?;
    let mut instance = factory.instantiate(generator)?;
    let started_at = clock.now();

    info!("trying state inference");
    let inference = match infer_state(instance.as_mut(), observed) {
        Ok(outcome) if outcome.is_perfect() => {
            return Ok(RecoveryReport {
                generator: generator.to_owned(),
                observed: observed.len(),
                started_at,
                finished_at: clock.now(),
                recovery: Recovery::Inferred { outcome },
            });
        }
        Ok(guess) => {
            info!("state inference inconclusive, brute forcing seed");
            Some(guess)
        }
        Err(RecoveryError::InsufficientData {
            required,
            available,
        }) => {
            warn!(required, available, "skipping state inference");
            None
        }
        Err(other) => return Err(other),
    };

    let outcome = brute_force(factory, generator, observed, config, observer)?;
    let recovery = if outcome.candidates.is_empty() {
        warn!(
            seeds_searched = outcome.seeds_evaluated,
            best_guess = inference.is_some(),
            "no seed found"
        );
        Recovery::Exhausted { outcome, inference }
    } else {
        Recovery::BruteForced { outcome, inference }
    };

    Ok(RecoveryReport {
        generator: generator.to_owned(),
        observed: observed.len(),
        started_at,
        finished_at: clock.now(),
        recovery,
    })
}
