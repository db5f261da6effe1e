//! Settings read from `UNTWISTER_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use untwister_core::clock::Clock;
use untwister_core::factory::GeneratorFactory;
use untwister_engine::config::{MatchMode, SearchConfig};

use crate::error::AppError;

/// Seed used when generating a sample stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedChoice {
    /// A caller-chosen seed.
    Fixed(u32),
    /// A seed drawn from the thread RNG.
    Random,
}

impl FromStr for SeedChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        s.parse().map(Self::Fixed).map_err(|e| {
            AppError::Config(format!(
                "UNTWISTER_GENERATE must be a u32 seed or \"random\": {e}"
            ))
        })
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Recover the generator from the observations in `input`.
    Recover {
        /// Observation file.
        input: PathBuf,
    },
    /// Print `depth` outputs of the generator seeded per `seed`.
    Generate {
        /// Seed to use.
        seed: SeedChoice,
    },
}

/// Fully parsed and validated settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Generator to attack or sample.
    pub generator: String,
    /// Search parameters.
    pub search: SearchConfig,
    /// Requested operation.
    pub mode: Mode,
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    expected: &str,
) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} must be {expected}: {e}")))
        })
        .transpose()
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool, AppError> {
    match lookup(key).as_deref().map(str::trim) {
        None | Some("" | "0" | "false" | "no") => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some(other) => Err(AppError::Config(format!(
            "{key} must be true or false, got {other:?}"
        ))),
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_lookup`].
    pub fn from_env(factory: &dyn GeneratorFactory, clock: &dyn Clock) -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok(), factory, clock)
    }

    /// Builds settings from `lookup`, which maps a variable name to its
    /// value.
    ///
    /// With `UNTWISTER_UNIX_TIME` set, the seed bounds are replaced by the
    /// Unix-time window around `clock.now()`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for unparsable values, an unregistered
    /// generator, or a missing input path, and `AppError::Recovery` when the
    /// resulting search configuration is invalid.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        factory: &dyn GeneratorFactory,
        clock: &dyn Clock,
    ) -> Result<Self, AppError> {
        let generator = match lookup("UNTWISTER_PRNG") {
            Some(name) => name.trim().to_owned(),
            None => factory
                .default_name()
                .ok_or_else(|| AppError::Config("no generators are registered".to_owned()))?
                .to_owned(),
        };
        let names = factory.names();
        if !names.contains(&generator.as_str()) {
            return Err(AppError::Config(format!(
                "UNTWISTER_PRNG {generator:?} is not one of: {}",
                names.join(", ")
            )));
        }

        let defaults = SearchConfig::default();
        let mut search = SearchConfig {
            lower_bound: parse_var(&lookup, "UNTWISTER_LOWER_SEED", "a u32")?
                .unwrap_or(defaults.lower_bound),
            upper_bound: parse_var(&lookup, "UNTWISTER_UPPER_SEED", "a u32")?
                .unwrap_or(defaults.upper_bound),
            depth: parse_var(&lookup, "UNTWISTER_DEPTH", "a positive integer")?
                .unwrap_or(defaults.depth),
            workers: parse_var(&lookup, "UNTWISTER_THREADS", "a positive integer")?
                .unwrap_or(defaults.workers),
            minimum_confidence: parse_var(&lookup, "UNTWISTER_CONFIDENCE", "a number")?
                .unwrap_or(defaults.minimum_confidence),
            match_mode: lookup("UNTWISTER_MATCH_MODE")
                .map(|raw| raw.parse::<MatchMode>())
                .transpose()?
                .unwrap_or_default(),
            poll_interval: defaults.poll_interval,
        };
        if parse_flag(&lookup, "UNTWISTER_UNIX_TIME")? {
            search = search.with_unix_time_window(clock);
        }
        search.validate()?;

        let mode = match lookup("UNTWISTER_GENERATE") {
            Some(raw) => Mode::Generate { seed: raw.parse()? },
            None => Mode::Recover {
                input: lookup("UNTWISTER_INPUT")
                    .filter(|path| !path.trim().is_empty())
                    .map(PathBuf::from)
                    .ok_or_else(|| {
                        AppError::Config(
                            "UNTWISTER_INPUT must be set unless UNTWISTER_GENERATE is".to_owned(),
                        )
                    })?,
            },
        };

        Ok(Self {
            generator,
            search,
            mode,
        })
    }
}
