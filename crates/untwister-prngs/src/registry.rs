//! Generator registry — maps names to constructors.

use untwister_core::error::RecoveryError;
use untwister_core::factory::GeneratorFactory;
use untwister_core::prng::Prng;

use crate::{glibc, lcg, mt19937};

type Constructor = fn() -> Box<dyn Prng>;

fn new_glibc_rand() -> Box<dyn Prng> {
    Box::new(glibc::GlibcRand::new())
}

fn new_mt19937() -> Box<dyn Prng> {
    Box::new(mt19937::Mt19937::new())
}

fn new_lcg32() -> Box<dyn Prng> {
    Box::new(lcg::Lcg32::new())
}

/// Ordered table of the generator families shipped with Untwister.
///
/// Every call to `instantiate` builds a new instance, so workers never share
/// generator state.
#[derive(Debug, Clone)]
pub struct GeneratorRegistry {
    entries: Vec<(&'static str, Constructor)>,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self {
            entries: vec![
                (glibc::NAME, new_glibc_rand as Constructor),
                (mt19937::NAME, new_mt19937 as Constructor),
                (lcg::NAME, new_lcg32 as Constructor),
            ],
        }
    }
}

impl GeneratorRegistry {
    /// Creates the registry of built-in generators. `glibc-rand` is the
    /// default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GeneratorFactory for GeneratorRegistry {
    fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    fn instantiate(&self, name: &str) -> Result<Box<dyn Prng>, RecoveryError> {
        self.entries
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, construct)| construct())
            .ok_or_else(|| {
                tracing::debug!(name, "generator lookup failed");
                RecoveryError::UnknownGenerator(name.to_owned())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_stable_and_default_first() {
        let registry = GeneratorRegistry::new();
        assert_eq!(registry.names(), vec!["glibc-rand", "mt19937", "lcg32"]);
        assert_eq!(registry.default_name(), Some("glibc-rand"));
    }

    #[test]
    fn test_every_name_instantiates_matching_generator() {
        let registry = GeneratorRegistry::new();
        for name in registry.names() {
            let generator = registry.instantiate(name).unwrap();
            assert_eq!(generator.name(), name);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let registry = GeneratorRegistry::new();
        let result = registry.instantiate("xorshift128");
        assert!(matches!(result, Err(RecoveryError::UnknownGenerator(name)) if name == "xorshift128"));
    }

    #[test]
    fn test_instances_are_independent() {
        let registry = GeneratorRegistry::new();
        let mut first = registry.instantiate("lcg32").unwrap();
        let mut second = registry.instantiate("lcg32").unwrap();
        first.seed(1);
        second.seed(1);
        first.random();
        first.random();
        assert_eq!(second.random(), {
            let mut fresh = registry.instantiate("lcg32").unwrap();
            fresh.seed(1);
            fresh.random()
        });
    }

    #[test]
    fn test_state_round_trip_for_every_generator() {
        let registry = GeneratorRegistry::new();
        for name in registry.names() {
            let mut generator = registry.instantiate(name).unwrap();
            let words: Vec<u32> = (0..generator.state_size())
                .map(|i| u32::try_from(i).unwrap().wrapping_mul(2_654_435_761))
                .collect();
            generator.set_state(&words);
            assert_eq!(generator.state(), words, "{name}");
            assert_eq!(generator.state().len(), generator.state_size());
        }
    }
}
