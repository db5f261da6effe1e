//! glibc `srand()` / `rand()`.
//!
//! glibc's default `rand()` is the TYPE_3 additive feedback generator:
//! `r[i] = r[i-3] + r[i-31] mod 2^32`, emitting `r[i] >> 1`. Seeding fills
//! 31 words with a Park–Miller sequence and discards 310 outputs.
//!
//! The dropped low bit means outputs obey `o[k] = o[k-31] + o[k-3] + c`
//! (mod 2^31) with an unknown carry `c` in `{0, 1}`. Prediction therefore
//! works on a window of the last 34 outputs, and uses cached evidence to
//! settle the carry where an observation exists.

use untwister_core::prng::{GeneratorState, Prng, fit_state};

/// Registry name.
pub const NAME: &str = "glibc-rand";

/// Output words needed to continue the lagged relation in both directions.
pub const STATE_SIZE: usize = 34;

const LONG_LAG: usize = 31;
const SHORT_LAG: usize = 3;
const TABLE_LEN: usize = LONG_LAG + SHORT_LAG;
const WARM_UP: usize = 310;
const OUTPUT_MASK: u32 = 0x7fff_ffff;

/// Reimplementation of glibc's `rand()`.
#[derive(Debug, Clone)]
pub struct GlibcRand {
    /// Additive feedback table, `front` is the oldest word.
    table: [u32; TABLE_LEN],
    front: usize,
    /// Ring of the last `STATE_SIZE` outputs, `next` is the oldest slot.
    outputs: [u32; STATE_SIZE],
    next: usize,
    evidence: Vec<u32>,
    window_start: Option<usize>,
}

impl Default for GlibcRand {
    fn default() -> Self {
        let mut rand = Self {
            table: [0; TABLE_LEN],
            front: 0,
            outputs: [0; STATE_SIZE],
            next: 0,
            evidence: Vec::new(),
            window_start: None,
        };
        rand.seed(1);
        rand
    }
}

impl GlibcRand {
    /// Creates a generator seeded with 1, as glibc is before any `srand`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn step(&mut self) -> u32 {
        let word = self.table[(self.front + SHORT_LAG) % TABLE_LEN]
            .wrapping_add(self.table[(self.front + LONG_LAG) % TABLE_LEN]);
        self.table[self.front] = word;
        self.front = (self.front + 1) % TABLE_LEN;
        word
    }

    fn observed_at(&self, position: Option<usize>) -> Option<u32> {
        position.and_then(|p| self.evidence.get(p).copied())
    }
}

impl Prng for GlibcRand {
    fn name(&self) -> &'static str {
        NAME
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn seed(&mut self, value: u32) {
        let value = if value == 0 { 1 } else { value };
        self.table[0] = value;

        // Park–Miller "minimal standard" in Schrage's form, exactly as
        // srandom_r computes it on a signed 32-bit word.
        let mut word = value as i32;
        for slot in 1..LONG_LAG {
            let hi = word / 127_773;
            let lo = word % 127_773;
            word = 16_807 * lo - 2_836 * hi;
            if word < 0 {
                word += 2_147_483_647;
            }
            self.table[slot] = word as u32;
        }
        for slot in LONG_LAG..TABLE_LEN {
            self.table[slot] = self.table[slot - LONG_LAG];
        }
        self.front = 0;
        for _ in 0..WARM_UP {
            self.step();
        }

        self.outputs = [0; STATE_SIZE];
        self.next = 0;
    }

    fn random(&mut self) -> u32 {
        let output = self.step() >> 1;
        self.outputs[self.next] = output;
        self.next = (self.next + 1) % STATE_SIZE;
        output
    }

    fn state_size(&self) -> usize {
        STATE_SIZE
    }

    fn state(&self) -> GeneratorState {
        (0..STATE_SIZE)
            .map(|k| self.outputs[(self.next + k) % STATE_SIZE])
            .collect()
    }

    fn set_state(&mut self, state: &[u32]) {
        self.outputs.copy_from_slice(&fit_state(state, STATE_SIZE));
        self.next = 0;
    }

    fn set_evidence(&mut self, observed: &[u32]) {
        self.evidence.clear();
        self.evidence.extend_from_slice(observed);
    }

    fn tune(&mut self, evidence_forward: &[u32], _evidence_backward: &[u32]) {
        // Everything before the window is forward evidence, so its length is
        // the window's position in the observed sequence.
        self.window_start = Some(evidence_forward.len());
    }

    fn predict_forward(&self, count: usize) -> Vec<u32> {
        let first = self.window_start.map(|start| start + STATE_SIZE);
        let mut history = self.state();
        for k in 0..count {
            let len = history.len();
            let base = history[len - LONG_LAG].wrapping_add(history[len - SHORT_LAG]) & OUTPUT_MASK;
            let carried = base.wrapping_add(1) & OUTPUT_MASK;
            let observed = self.observed_at(first.map(|p| p + k));
            history.push(if observed == Some(carried) { carried } else { base });
        }
        history.split_off(STATE_SIZE)
    }

    fn predict_backward(&self, count: usize) -> Vec<u32> {
        let mut ahead: std::collections::VecDeque<u32> = self.state().into();
        let mut predictions = Vec::with_capacity(count);
        for k in 0..count {
            // ahead[0] is o[j+1]; o[j] = o[j+31] - o[j+28] - c.
            let base = ahead[LONG_LAG - 1].wrapping_sub(ahead[LONG_LAG - SHORT_LAG - 1]) & OUTPUT_MASK;
            let borrowed = base.wrapping_sub(1) & OUTPUT_MASK;
            let position = self.window_start.and_then(|start| start.checked_sub(k + 1));
            let value = if self.observed_at(position) == Some(borrowed) {
                borrowed
            } else {
                base
            };
            ahead.push_front(value);
            predictions.push(value);
        }
        predictions
    }

    fn reverse_to_seed(&self, max_search: u32) -> Option<u32> {
        let target = self.state();
        let mut replay = Self::new();
        (1..=max_search).find(|&candidate| {
            replay.seed(candidate);
            target.iter().all(|&word| replay.random() == word)
        })
    }
}
