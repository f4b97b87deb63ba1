//! Short rolling window of recent memory samples.

use std::collections::VecDeque;
use std::collections::vec_deque;

use crate::model::MemorySample;

/// Number of samples retained for the trend table.
pub const HISTORY_CAPACITY: usize = 4;

/// One retained reading: used and available memory in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub used_kb: u64,
    pub available_kb: u64,
}

/// A history row: offset in seconds relative to the newest sample, plus the
/// reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRow {
    pub offset_secs: i64,
    pub used_kb: u64,
    pub available_kb: u64,
}

/// FIFO ring of the last [`HISTORY_CAPACITY`] samples, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MemorySampleHistory {
    entries: VecDeque<HistoryEntry>,
}

impl MemorySampleHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Appends the sample's used/available pair, evicting the oldest entry
    /// once capacity is exceeded.
    pub fn record(&mut self, sample: &MemorySample) {
        self.entries.push_back(HistoryEntry {
            used_kb: sample.used_kb,
            available_kb: sample.available_kb,
        });
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates oldest to newest. Offsets run from `-(len - 1)` up to `0`
    /// under the fixed one-second sampling cadence.
    ///
    /// The iterator is `Clone`, so a caller can walk the rows more than once.
    pub fn iter(&self) -> HistoryIter<'_> {
        HistoryIter {
            inner: self.entries.iter(),
            next_offset: 1 - self.entries.len() as i64,
        }
    }
}

impl<'a> IntoIterator for &'a MemorySampleHistory {
    type Item = HistoryRow;
    type IntoIter = HistoryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`HistoryRow`]s, see [`MemorySampleHistory::iter`].
#[derive(Debug, Clone)]
pub struct HistoryIter<'a> {
    inner: vec_deque::Iter<'a, HistoryEntry>,
    next_offset: i64,
}

impl Iterator for HistoryIter<'_> {
    type Item = HistoryRow;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        let row = HistoryRow {
            offset_secs: self.next_offset,
            used_kb: entry.used_kb,
            available_kb: entry.available_kb,
        };
        self.next_offset += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for HistoryIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(used: u64, available: u64) -> MemorySample {
        MemorySample::from_total_available(used + available, available)
    }

    #[test]
    fn test_empty_history_yields_nothing() {
        let history = MemorySampleHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.iter().count(), 0);
    }

    #[test]
    fn test_single_sample_has_zero_offset() {
        let mut history = MemorySampleHistory::new();
        history.record(&sample(10, 20));

        let rows: Vec<_> = history.iter().collect();
        assert_eq!(
            rows,
            vec![HistoryRow {
                offset_secs: 0,
                used_kb: 10,
                available_kb: 20
            }]
        );
    }

    #[test]
    fn test_partial_history_offsets() {
        let mut history = MemorySampleHistory::new();
        history.record(&sample(1, 100));
        history.record(&sample(2, 100));
        history.record(&sample(3, 100));

        let offsets: Vec<i64> = history.iter().map(|r| r.offset_secs).collect();
        assert_eq!(offsets, vec![-2, -1, 0]);
    }

    #[test]
    fn test_eviction_keeps_last_four_in_order() {
        let mut history = MemorySampleHistory::new();
        for used in 1..=7 {
            history.record(&sample(used, 1000));
            assert!(history.len() <= HISTORY_CAPACITY);
        }

        let rows: Vec<(i64, u64)> = history.iter().map(|r| (r.offset_secs, r.used_kb)).collect();
        assert_eq!(rows, vec![(-3, 4), (-2, 5), (-1, 6), (0, 7)]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut history = MemorySampleHistory::new();
        history.record(&sample(5, 6));
        history.record(&sample(7, 8));

        let iter = history.iter();
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(history.iter().len(), 2);
        assert_eq!((&history).into_iter().count(), 2);
    }
}
