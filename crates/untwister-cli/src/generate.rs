//! Sample stream generation, for producing test observations.

use rand::Rng;
use tracing::info;
use untwister_core::factory::GeneratorFactory;

use crate::config::SeedChoice;
use crate::error::AppError;

impl SeedChoice {
    /// The concrete seed, drawing one from the thread RNG if needed.
    #[must_use]
    pub fn resolve(self) -> u32 {
        match self {
            Self::Fixed(seed) => seed,
            Self::Random => rand::rng().random(),
        }
    }
}

/// The first `count` outputs of `generator` seeded with `seed`.
///
/// # Errors
///
/// Returns `AppError::Recovery` if `generator` is not registered.
pub fn generate_sample(
    factory: &dyn GeneratorFactory,
    generator: &str,
    seed: u32,
    count: usize,
) -> Result<Vec<u32>, AppError> {
    let mut prng = factory.instantiate(generator)?;
    prng.seed(seed);
    info!(generator, seed, count, "generating sample");
    Ok((0..count).map(|_| prng.random()).collect())
}
