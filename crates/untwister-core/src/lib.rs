//! Untwister Core — shared abstractions for seed recovery.
//!
//! This crate defines the PRNG capability contract, the observed data the
//! engine works on, and the error taxonomy shared by every other crate. It
//! contains no generator math and no search logic.

pub mod clock;
pub mod error;
pub mod factory;
pub mod prng;
pub mod sequence;
