//! Generator factory abstraction.

use crate::error::RecoveryError;
use crate::prng::Prng;

/// Produces fresh, independent generator instances by name.
///
/// Each call to [`instantiate`](GeneratorFactory::instantiate) returns a new
/// instance; no instance is ever shared between callers.
pub trait GeneratorFactory: Send + Sync {
    /// Registered generator names in stable order. The first is the default.
    fn names(&self) -> Vec<&'static str>;

    /// Creates a new instance of the named generator.
    ///
    /// # Errors
    ///
    /// Returns `RecoveryError::UnknownGenerator` if `name` is not registered.
    fn instantiate(&self, name: &str) -> Result<Box<dyn Prng>, RecoveryError>;

    /// Returns the default generator name, if any generator is registered.
    fn default_name(&self) -> Option<&'static str> {
        self.names().first().copied()
    }
}
