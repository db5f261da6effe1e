//! Test generators — deterministic `Prng` implementations for tests.

use untwister_core::prng::{GeneratorState, Prng, fit_state};

/// A generator that counts upwards: seeding with `s` yields `s+1, s+2, ...`.
///
/// Its state is the last `state_size` outputs, so inference over its own
/// output recovers a perfect window, and both prediction directions plus
/// seed reversal are exact. Cheap enough for brute-force tests over large
/// ranges.
#[derive(Debug, Clone)]
pub struct CountingPrng {
    words: Vec<u32>,
}

impl CountingPrng {
    /// Registry name used by `MockFactory::counting`.
    pub const NAME: &'static str = "counting";

    /// Creates a counter with `state_size` state words, seeded with 0.
    ///
    /// # Panics
    ///
    /// Panics if `state_size` is zero.
    #[must_use]
    pub fn new(state_size: usize) -> Self {
        assert!(state_size > 0, "state size must be positive");
        let mut prng = Self {
            words: vec![0; state_size],
        };
        prng.seed(0);
        prng
    }

    /// Output stream of a counter seeded with `seed`.
    #[must_use]
    pub fn stream(seed: u32, count: usize) -> Vec<u32> {
        let mut prng = Self::new(1);
        prng.seed(seed);
        (0..count).map(|_| prng.random()).collect()
    }
}

impl Prng for CountingPrng {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn seed(&mut self, value: u32) {
        let size = self.words.len();
        // The window as if the last `size` outputs were ..., value - 1, value.
        for (offset, word) in self.words.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let back = (size - 1 - offset) as u32;
            *word = value.wrapping_sub(back);
        }
    }

    fn random(&mut self) -> u32 {
        let next = self.words[self.words.len() - 1].wrapping_add(1);
        self.words.rotate_left(1);
        let last = self.words.len() - 1;
        self.words[last] = next;
        next
    }

    fn state_size(&self) -> usize {
        self.words.len()
    }

    fn state(&self) -> GeneratorState {
        self.words.clone()
    }

    fn set_state(&mut self, state: &[u32]) {
        self.words = fit_state(state, self.words.len());
    }

    fn predict_forward(&self, count: usize) -> Vec<u32> {
        let last = self.words[self.words.len() - 1];
        (1..=count)
            .map(|step| {
                #[allow(clippy::cast_possible_truncation)]
                let step = step as u32;
                last.wrapping_add(step)
            })
            .collect()
    }

    fn predict_backward(&self, count: usize) -> Vec<u32> {
        let first = self.words[0];
        (1..=count)
            .map(|step| {
                #[allow(clippy::cast_possible_truncation)]
                let step = step as u32;
                first.wrapping_sub(step)
            })
            .collect()
    }

    fn reverse_to_seed(&self, max_search: u32) -> Option<u32> {
        (max_search > 0).then(|| self.words[0].wrapping_sub(1))
    }
}

/// A generator that panics when asked for output. Used to test that worker
/// failures surface instead of being swallowed.
#[derive(Debug, Default, Clone)]
pub struct PanickingPrng;

impl PanickingPrng {
    /// Registry name used by `MockFactory::panicking`.
    pub const NAME: &'static str = "panicking";
}

impl Prng for PanickingPrng {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn seed(&mut self, _value: u32) {}

    fn random(&mut self) -> u32 {
        panic!("PanickingPrng::random called");
    }

    fn state_size(&self) -> usize {
        1
    }

    fn state(&self) -> GeneratorState {
        vec![0]
    }

    fn set_state(&mut self, _state: &[u32]) {}

    fn predict_forward(&self, count: usize) -> Vec<u32> {
        vec![0; count]
    }
}

/// A generator whose reported state is always one word short of its declared
/// state size. Inference must reject it as a contract violation.
#[derive(Debug, Default, Clone)]
pub struct MisreportingPrng;

impl MisreportingPrng {
    /// Registry name used by `MockFactory::misreporting`.
    pub const NAME: &'static str = "misreporting";

    const STATE_SIZE: usize = 2;
}

impl Prng for MisreportingPrng {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn seed(&mut self, _value: u32) {}

    fn random(&mut self) -> u32 {
        0
    }

    fn state_size(&self) -> usize {
        Self::STATE_SIZE
    }

    fn state(&self) -> GeneratorState {
        vec![0; Self::STATE_SIZE - 1]
    }

    fn set_state(&mut self, _state: &[u32]) {}

    fn predict_forward(&self, count: usize) -> Vec<u32> {
        vec![0; count]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_stream_starts_after_seed() {
        assert_eq!(CountingPrng::stream(10, 3), vec![11, 12, 13]);
    }

    #[test]
    fn test_counting_state_tracks_last_outputs() {
        let mut prng = CountingPrng::new(3);
        prng.seed(5);
        prng.random();
        prng.random();
        assert_eq!(prng.state(), vec![5, 6, 7]);
        assert_eq!(prng.predict_forward(2), vec![8, 9]);
        assert_eq!(prng.predict_backward(2), vec![4, 3]);
    }
}
