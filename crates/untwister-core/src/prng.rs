//! The PRNG capability contract.
//!
//! Every generator family the engine can attack implements [`Prng`]. The
//! engine never looks at a generator's math; it seeds, draws, injects state
//! and asks for predictions through this trait alone.

/// Internal generator state as an ordered sequence of 32-bit words.
pub type GeneratorState = Vec<u32>;

/// Capability contract for a pseudo-random number generator.
///
/// Instances are exclusively owned by one caller at a time. Search workers
/// each obtain their own instance through a
/// [`GeneratorFactory`](crate::factory::GeneratorFactory).
pub trait Prng: Send {
    /// Stable identity used for registry lookup and display.
    fn name(&self) -> &'static str;

    /// (Re)initialises the generator from a 32-bit seed.
    fn seed(&mut self, value: u32);

    /// Produces the next output of the deterministic stream.
    fn random(&mut self) -> u32;

    /// Number of 32-bit words in the generator's state.
    fn state_size(&self) -> usize;

    /// Returns the current state, exactly `state_size()` words long.
    fn state(&self) -> GeneratorState;

    /// Overwrites the state directly, bypassing seeding.
    ///
    /// Implementations pad with zeros or truncate so the stored state is
    /// always `state_size()` words long (see [`fit_state`]).
    fn set_state(&mut self, state: &[u32]);

    /// Caches the full observed sequence for generator-specific heuristics.
    fn set_evidence(&mut self, _observed: &[u32]) {}

    /// Supplies the observations before and after the current state window.
    fn tune(&mut self, _evidence_forward: &[u32], _evidence_backward: &[u32]) {}

    /// Predicts the next `count` outputs from the current state.
    fn predict_forward(&self, count: usize) -> Vec<u32>;

    /// Predicts the `count` outputs preceding the current state, nearest
    /// first. An empty result means backward prediction is unsupported.
    fn predict_backward(&self, _count: usize) -> Vec<u32> {
        Vec::new()
    }

    /// Searches for a seed reproducing the current state, spending at most
    /// `max_search` steps. `None` means the state is known but the seed is
    /// not cheaply recoverable.
    fn reverse_to_seed(&self, _max_search: u32) -> Option<u32> {
        None
    }
}

/// Pads with zeros or truncates `state` to exactly `size` words.
#[must_use]
pub fn fit_state(state: &[u32], size: usize) -> GeneratorState {
    let mut fitted = state.to_vec();
    fitted.resize(size, 0);
    fitted
}
