//! Untwister PRNGs — generator families behind the capability contract.
//!
//! Each module implements [`Prng`](untwister_core::prng::Prng) for one
//! generator family. The [`registry`] maps names to constructors so search
//! workers can each obtain a private instance.

pub mod glibc;
pub mod lcg;
pub mod mt19937;
pub mod registry;

pub use glibc::GlibcRand;
pub use lcg::Lcg32;
pub use mt19937::Mt19937;
pub use registry::GeneratorRegistry;
