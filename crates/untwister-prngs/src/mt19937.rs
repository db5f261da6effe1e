//! 32-bit Mersenne Twister (MT19937).
//!
//! The state exchanged through the contract is the current block of 624
//! *tempered* words, i.e. the outputs the block produces. Tempering is a
//! bijection, so `set_state` untempers the words back into the twist array
//! and the generator can continue the stream from any 624 consecutive
//! outputs.

use untwister_core::prng::{GeneratorState, Prng, fit_state};

/// Registry name.
pub const NAME: &str = "mt19937";

/// Words in the twist array.
pub const STATE_SIZE: usize = 624;

const SHIFT: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const INIT_MULTIPLIER: u32 = 0x6c07_8965;

/// Mersenne Twister generator.
#[derive(Debug, Clone)]
pub struct Mt19937 {
    mt: [u32; STATE_SIZE],
    index: usize,
}

impl Default for Mt19937 {
    fn default() -> Self {
        let mut generator = Self {
            mt: [0; STATE_SIZE],
            index: STATE_SIZE,
        };
        generator.seed(5489);
        generator
    }
}

impl Mt19937 {
    /// Creates a generator with the reference default seed 5489.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn twist(&mut self) {
        let mt = &mut self.mt;
        for i in 0..STATE_SIZE {
            let y = (mt[i] & UPPER_MASK) | (mt[(i + 1) % STATE_SIZE] & LOWER_MASK);
            mt[i] = mt[(i + SHIFT) % STATE_SIZE] ^ (y >> 1);
            if y & 1 != 0 {
                mt[i] ^= MATRIX_A;
            }
        }
    }

    /// First output after seeding with `seed`, computed without filling the
    /// whole array.
    #[allow(clippy::cast_possible_truncation)]
    fn first_output(seed: u32) -> u32 {
        let mut word = seed;
        let mut second = 0;
        let mut shifted = 0;
        for i in 1..=SHIFT {
            word = init_step(word, i as u32);
            if i == 1 {
                second = word;
            }
            if i == SHIFT {
                shifted = word;
            }
        }
        let y = (seed & UPPER_MASK) | (second & LOWER_MASK);
        let mut first = shifted ^ (y >> 1);
        if y & 1 != 0 {
            first ^= MATRIX_A;
        }
        temper(first)
    }
}

fn init_step(previous: u32, i: u32) -> u32 {
    (previous ^ (previous >> 30))
        .wrapping_mul(INIT_MULTIPLIER)
        .wrapping_add(i)
}

fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & 0x9d2c_5680;
    y ^= (y << 15) & 0xefc6_0000;
    y ^= y >> 18;
    y
}

/// Inverts `y ^= y >> shift`.
fn undo_right_shift(mut value: u32, shift: u32) -> u32 {
    let mut result = value;
    for _ in 0..=32 / shift {
        value >>= shift;
        result ^= value;
    }
    result
}

/// Inverts `y ^= (y << shift) & mask`.
fn undo_left_shift(value: u32, shift: u32, mask: u32) -> u32 {
    let mut result = value;
    for _ in 0..32 / shift {
        result = value ^ ((result << shift) & mask);
    }
    result
}

/// Recovers the twist-array word behind a tempered output.
#[must_use]
pub fn untemper(output: u32) -> u32 {
    let y = undo_right_shift(output, 18);
    let y = undo_left_shift(y, 15, 0xefc6_0000);
    let y = undo_left_shift(y, 7, 0x9d2c_5680);
    undo_right_shift(y, 11)
}

impl Prng for Mt19937 {
    fn name(&self) -> &'static str {
        NAME
    }

    #[allow(clippy::cast_possible_truncation)]
    fn seed(&mut self, value: u32) {
        self.mt[0] = value;
        for i in 1..STATE_SIZE {
            self.mt[i] = init_step(self.mt[i - 1], i as u32);
        }
        self.index = STATE_SIZE;
    }

    fn random(&mut self) -> u32 {
        if self.index >= STATE_SIZE {
            self.twist();
            self.index = 0;
        }
        let output = temper(self.mt[self.index]);
        self.index += 1;
        output
    }

    fn state_size(&self) -> usize {
        STATE_SIZE
    }

    fn state(&self) -> GeneratorState {
        self.mt.iter().map(|&word| temper(word)).collect()
    }

    fn set_state(&mut self, state: &[u32]) {
        for (slot, word) in self.mt.iter_mut().zip(fit_state(state, STATE_SIZE)) {
            *slot = untemper(word);
        }
        self.index = STATE_SIZE;
    }

    fn predict_forward(&self, count: usize) -> Vec<u32> {
        let mut replay = self.clone();
        (0..count).map(|_| replay.random()).collect()
    }

    fn reverse_to_seed(&self, max_search: u32) -> Option<u32> {
        let target = self.state();
        let mut replay = Self::new();
        (0..max_search)
            .filter(|&candidate| Self::first_output(candidate) == target[0])
            .find(|&candidate| {
                replay.seed(candidate);
                target.iter().all(|&word| replay.random() == word)
            })
    }
}
