//! Pending sub-problems and merging of small adjacent buckets.

use std::fmt;

/// One pending sub-problem: the range `[start, end)` still has to be ordered from
/// character `index` on, and only characters before `max_index` matter.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct SortState {
    pub start: usize,
    pub end: usize,
    pub index: usize,
    pub max_index: usize,
}

impl SortState {
    pub(crate) fn new(start: usize, end: usize, index: usize, max_index: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            index,
            max_index,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    /// No character left to look at; processing this state is a no-op.
    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.index >= self.max_index
    }

    /// Merges with an adjacent state on the same index, in either order.
    pub(crate) fn merge_with(&self, other: &SortState) -> Option<SortState> {
        if self.index != other.index {
            return None;
        }
        let (first, second) = if self.end == other.start {
            (self, other)
        } else if other.end == self.start {
            (other, self)
        } else {
            return None;
        };
        Some(SortState::new(
            first.start,
            second.end,
            self.index,
            self.max_index.max(other.max_index),
        ))
    }
}

impl fmt::Debug for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) @ {} (max: {})",
            self.start, self.end, self.index, self.max_index
        )
    }
}

/// Accumulates small adjacent buckets split on the same index into one state.
///
/// Buckets are offered with their split index. A flushed accumulator holding a single
/// bucket moves on to the next index; one holding several keeps the split index, since
/// its buckets still differ there, and is small enough to be finished by a terminal
/// comparison sort.
pub(crate) struct RangeMerger {
    pending: Option<SortState>,
    merged: bool,
    max_len: usize,
}

impl RangeMerger {
    /// Creates a merger whose accumulated ranges stay below `max_len`.
    pub(crate) fn new(max_len: usize) -> Self {
        Self {
            pending: None,
            merged: false,
            max_len,
        }
    }

    /// Adds `bucket`, flushing the accumulator first when the two cannot be combined.
    pub(crate) fn offer(&mut self, bucket: SortState, stack: &mut Vec<SortState>) {
        let Some(pending) = self.pending else {
            self.pending = Some(bucket);
            return;
        };
        match pending.merge_with(&bucket) {
            Some(merged) if merged.len() < self.max_len => {
                self.pending = Some(merged);
                self.merged = true;
            }
            _ => {
                self.flush(stack);
                self.pending = Some(bucket);
            }
        }
    }

    /// Pushes the accumulated state, if any, onto `stack`.
    pub(crate) fn flush(&mut self, stack: &mut Vec<SortState>) {
        if let Some(mut state) = self.pending.take() {
            if !self.merged {
                state.index += 1;
            }
            if !state.is_exhausted() {
                stack.push(state);
            }
        }
        self.merged = false;
    }
}
