//! The observed output sequence.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::RecoveryError;

/// Observed generator outputs, the ground truth every candidate is scored
/// against.
///
/// Immutable once built and cheap to clone: clones share one allocation, so
/// the sequence can be handed to every worker without synchronisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedSequence(Arc<[u32]>);

impl ObservedSequence {
    /// Builds a sequence from observed values.
    ///
    /// # Errors
    ///
    /// Returns `RecoveryError::InsufficientData` if `values` is empty.
    pub fn new(values: Vec<u32>) -> Result<Self, RecoveryError> {
        if values.is_empty() {
            return Err(RecoveryError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        Ok(Self(values.into()))
    }

    /// Returns the observations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Deref for ObservedSequence {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl TryFrom<Vec<u32>> for ObservedSequence {
    type Error = RecoveryError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl Serialize for ObservedSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_is_rejected() {
        let result = ObservedSequence::new(Vec::new());
        assert!(matches!(
            result,
            Err(RecoveryError::InsufficientData {
                required: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn test_clones_share_storage() {
        let observed = ObservedSequence::new(vec![1, 2, 3]).unwrap();
        let clone = observed.clone();
        assert!(std::ptr::eq(observed.as_slice(), clone.as_slice()));
        assert_eq!(clone.len(), 3);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let observed = ObservedSequence::try_from(vec![4, 5]).unwrap();
        assert_eq!(serde_json::to_string(&observed).unwrap(), "[4,5]");
    }
}
