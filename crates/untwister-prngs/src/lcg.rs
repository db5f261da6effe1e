//! 32-bit linear congruential generator.
//!
//! `x' = A·x + C mod 2^32` with the Numerical Recipes constants, emitting the
//! full state word. Because the state is the last output, both prediction
//! directions and seed reversal are exact.

use untwister_core::prng::{GeneratorState, Prng, fit_state};

/// Registry name.
pub const NAME: &str = "lcg32";

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const MULTIPLIER_INVERSE: u32 = mod_inverse(MULTIPLIER);

/// Inverse of an odd `a` modulo 2^32 by Newton iteration.
const fn mod_inverse(a: u32) -> u32 {
    // a·a ≡ 1 (mod 8) for odd a, so the first guess is correct to 3 bits and
    // every round doubles that.
    let mut inverse = a;
    let mut round = 0;
    while round < 5 {
        inverse = inverse.wrapping_mul(2u32.wrapping_sub(a.wrapping_mul(inverse)));
        round += 1;
    }
    inverse
}

fn step(x: u32) -> u32 {
    x.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)
}

fn step_back(x: u32) -> u32 {
    x.wrapping_sub(INCREMENT).wrapping_mul(MULTIPLIER_INVERSE)
}

/// Linear congruential generator over the full 32-bit word.
#[derive(Debug, Clone, Default)]
pub struct Lcg32 {
    x: u32,
}

impl Lcg32 {
    /// Creates a generator seeded with 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prng for Lcg32 {
    fn name(&self) -> &'static str {
        NAME
    }

    fn seed(&mut self, value: u32) {
        self.x = value;
    }

    fn random(&mut self) -> u32 {
        self.x = step(self.x);
        self.x
    }

    fn state_size(&self) -> usize {
        1
    }

    fn state(&self) -> GeneratorState {
        vec![self.x]
    }

    fn set_state(&mut self, state: &[u32]) {
        self.x = fit_state(state, 1)[0];
    }

    fn predict_forward(&self, count: usize) -> Vec<u32> {
        std::iter::successors(Some(self.x), |&x| Some(step(x)))
            .skip(1)
            .take(count)
            .collect()
    }

    fn predict_backward(&self, count: usize) -> Vec<u32> {
        std::iter::successors(Some(self.x), |&x| Some(step_back(x)))
            .skip(1)
            .take(count)
            .collect()
    }

    fn reverse_to_seed(&self, max_search: u32) -> Option<u32> {
        (max_search > 0).then(|| step_back(self.x))
    }
}
