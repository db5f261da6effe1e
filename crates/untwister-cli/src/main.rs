//! Untwister entry point.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use untwister_cli::config::{Mode, Settings};
use untwister_cli::error::AppError;
use untwister_cli::generate::generate_sample;
use untwister_cli::input::read_observations;
use untwister_cli::progress::ConsoleProgress;
use untwister_core::clock::SystemClock;
use untwister_engine::recovery::recover;
use untwister_prngs::GeneratorRegistry;

fn run() -> Result<(), AppError> {
    let registry = GeneratorRegistry::new();
    let clock = SystemClock;
    let settings = Settings::from_env(&registry, &clock)?;

    match settings.mode {
        Mode::Generate { seed } => {
            let seed = seed.resolve();
            let sample =
                generate_sample(&registry, &settings.generator, seed, settings.search.depth)?;
            for value in sample {
                println!("{value}");
            }
        }
        Mode::Recover { input } => {
            let observed = read_observations(&input)?;
            tracing::info!(
                generator = %settings.generator,
                lower = settings.search.lower_bound,
                upper = settings.search.upper_bound,
                workers = settings.search.workers,
                "Starting recovery"
            );
            let report = recover(
                &registry,
                &settings.generator,
                &observed,
                &settings.search,
                &ConsoleProgress,
                &clock,
            )?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if let Some(no_match) = report.no_match() {
                return Err(no_match.into());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing subscriber; stdout is reserved for results.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    if std::env::var("UNTWISTER_LOG_FORMAT").is_ok_and(|format| format == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "untwister failed");
            ExitCode::from(err.exit_code())
        }
    }
}
