//! Division of a seed range among workers.

use std::ops::Range;

use serde::Serialize;
use untwister_core::error::RecoveryError;

/// Half-open slice `[start, end)` of the seed space owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkRange {
    /// First seed in the range.
    pub start: u32,
    /// One past the last seed in the range.
    pub end: u32,
}

impl WorkRange {
    /// Number of seeds in the range.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the range holds no seeds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Seeds in increasing order.
    #[must_use]
    pub fn seeds(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Shifts the range up by `base`.
    ///
    /// # Errors
    ///
    /// Returns `RecoveryError::InvalidConfiguration` if the shifted range
    /// leaves the 32-bit seed space.
    pub fn offset(self, base: u32) -> Result<Self, RecoveryError> {
        match (self.start.checked_add(base), self.end.checked_add(base)) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(RecoveryError::InvalidConfiguration(format!(
                "range {}..{} shifted by {base} overflows the seed space",
                self.start, self.end
            ))),
        }
    }
}

/// Splits `[0, total_size)` into `worker_count` contiguous ranges.
///
/// Every range gets `total_size / worker_count` seeds and the first
/// `total_size % worker_count` ranges get one more. Ranges come back in
/// worker order, so their concatenation is exactly `[0, total_size)`. With
/// more workers than seeds the trailing ranges are empty.
///
/// # Errors
///
/// Returns `RecoveryError::InvalidConfiguration` if `worker_count` is zero.
pub fn partition(total_size: u32, worker_count: usize) -> Result<Vec<WorkRange>, RecoveryError> {
    if worker_count == 0 {
        return Err(RecoveryError::InvalidConfiguration(
            "worker count must be at least 1".to_owned(),
        ));
    }

    // More workers than seeds only adds empty ranges, so capping the divisor
    // keeps the arithmetic in 32 bits without changing the split.
    let workers = u32::try_from(worker_count).unwrap_or(u32::MAX).min(total_size.max(1));
    let base = total_size / workers;
    let mut leftover = total_size % workers;

    let mut ranges = Vec::with_capacity(worker_count);
    let mut start = 0;
    for index in 0..worker_count {
        let len = if index < workers as usize {
            if leftover > 0 {
                leftover -= 1;
                base + 1
            } else {
                base
            }
        } else {
            0
        };
        ranges.push(WorkRange {
            start,
            end: start + len,
        });
        start += len;
    }
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split() {
        let ranges = partition(12, 3).unwrap();
        assert_eq!(
            ranges,
            vec![
                WorkRange { start: 0, end: 4 },
                WorkRange { start: 4, end: 8 },
                WorkRange { start: 8, end: 12 },
            ]
        );
    }

    #[test]
    fn test_remainder_goes_to_first_workers() {
        let lengths: Vec<u32> = partition(11, 4).unwrap().iter().map(WorkRange::len).collect();
        assert_eq!(lengths, vec![3, 3, 3, 2]);
    }

    #[test]
    fn test_zero_total_yields_empty_ranges() {
        let ranges = partition(0, 3).unwrap();
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(WorkRange::is_empty));
    }

    #[test]
    fn test_more_workers_than_seeds() {
        let lengths: Vec<u32> = partition(2, 5).unwrap().iter().map(WorkRange::len).collect();
        assert_eq!(lengths, vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_full_seed_space() {
        let ranges = partition(u32::MAX, 7).unwrap();
        assert_eq!(ranges.last().unwrap().end, u32::MAX);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            partition(10, 0),
            Err(RecoveryError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_offset_shifts_range() {
        let range = WorkRange { start: 0, end: 10 }.offset(100).unwrap();
        assert_eq!(range, WorkRange { start: 100, end: 110 });
        assert!(WorkRange { start: 0, end: 10 }.offset(u32::MAX).is_err());
    }

    proptest! {
        #[test]
        fn ranges_tile_the_whole_space(total in 0u32..5_000_000, workers in 1usize..64) {
            let ranges = partition(total, workers).unwrap();
            prop_assert_eq!(ranges.len(), workers);

            let mut expected_start = 0;
            for range in &ranges {
                prop_assert_eq!(range.start, expected_start);
                prop_assert!(range.end >= range.start);
                expected_start = range.end;
            }
            prop_assert_eq!(expected_start, total);
        }

        #[test]
        fn range_lengths_differ_by_at_most_one(total in 0u32..5_000_000, workers in 1usize..64) {
            let lengths: Vec<u32> = partition(total, workers).unwrap().iter().map(WorkRange::len).collect();
            let longest = lengths.iter().max().copied().unwrap_or(0);
            let shortest = lengths.iter().min().copied().unwrap_or(0);
            prop_assert!(longest - shortest <= 1);
        }
    }
}
