//! Untwister Engine — seed and state recovery.
//!
//! Two attacks against a generator named in a
//! [`GeneratorFactory`](untwister_core::factory::GeneratorFactory):
//!
//! - [`inference`] slides a state-sized window over the observations and
//!   asks the generator to predict the rest. Cheap, and exact for generators
//!   whose state can be read off their output.
//! - [`brute_force`] partitions a seed range across worker threads and
//!   replays every candidate seed against the observations.
//!
//! [`recovery::recover`] runs inference first and falls back to brute force.

pub mod brute_force;
pub mod cancel;
pub mod config;
pub mod inference;
pub mod partition;
pub mod progress;
pub mod recovery;
