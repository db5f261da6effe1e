//! Test factories — mock `GeneratorFactory` implementations for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use untwister_core::error::RecoveryError;
use untwister_core::factory::GeneratorFactory;
use untwister_core::prng::Prng;

use crate::prng::{CountingPrng, MisreportingPrng, PanickingPrng};

type Constructor = Box<dyn Fn() -> Box<dyn Prng> + Send + Sync>;

/// A factory over caller-supplied constructors that counts how many
/// instances it has handed out.
pub struct MockFactory {
    entries: Vec<(&'static str, Constructor)>,
    instantiations: AtomicUsize,
}

impl std::fmt::Debug for MockFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFactory")
            .field("names", &self.names())
            .field("instantiations", &self.instantiations())
            .finish()
    }
}

impl MockFactory {
    /// Creates a factory with no registered generators.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            instantiations: AtomicUsize::new(0),
        }
    }

    /// Registers `name`, built by `construct`.
    #[must_use]
    pub fn with<F>(mut self, name: &'static str, construct: F) -> Self
    where
        F: Fn() -> Box<dyn Prng> + Send + Sync + 'static,
    {
        self.entries.push((name, Box::new(construct)));
        self
    }

    /// A factory serving `CountingPrng` with the given state size.
    #[must_use]
    pub fn counting(state_size: usize) -> Self {
        Self::empty().with(CountingPrng::NAME, move || {
            Box::new(CountingPrng::new(state_size))
        })
    }

    /// A factory serving `PanickingPrng`.
    #[must_use]
    pub fn panicking() -> Self {
        Self::empty().with(PanickingPrng::NAME, || Box::new(PanickingPrng))
    }

    /// A factory serving `MisreportingPrng`.
    #[must_use]
    pub fn misreporting() -> Self {
        Self::empty().with(MisreportingPrng::NAME, || Box::new(MisreportingPrng))
    }

    /// Number of instances created so far.
    pub fn instantiations(&self) -> usize {
        self.instantiations.load(Ordering::SeqCst)
    }
}

impl GeneratorFactory for MockFactory {
    fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    fn instantiate(&self, name: &str) -> Result<Box<dyn Prng>, RecoveryError> {
        let (_, construct) = self
            .entries
            .iter()
            .find(|(registered, _)| *registered == name)
            .ok_or_else(|| RecoveryError::UnknownGenerator(name.to_owned()))?;
        self.instantiations.fetch_add(1, Ordering::SeqCst);
        Ok(construct())
    }
}
