//! Shared test mocks and utilities for the Untwister engine.

mod clock;
mod factory;
mod prng;

pub use clock::FixedClock;
pub use factory::MockFactory;
pub use prng::{CountingPrng, MisreportingPrng, PanickingPrng};
