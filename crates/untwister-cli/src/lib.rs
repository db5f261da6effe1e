//! Untwister CLI — environment configuration, input loading and reporting
//! for the `untwister` binary.

pub mod config;
pub mod error;
pub mod generate;
pub mod input;
pub mod progress;
