//! Adaptive MSD string sort.
//!
//! Each pending sub-range is handed to a size-driven dispatcher:
//! - **Inline resolvers** for 2 and 3 elements.
//! - **Insertion sort** on full suffixes for tiny ranges.
//! - **Comparison sort** for small ranges, either final (few characters left) or keyed
//!   only on the current character.
//! - **Counting pass** on the current character for everything larger.
//!
//! Buckets that still need work are pushed onto an explicit stack instead of recursing,
//! since the depth grows with the length of the shared prefixes. Small adjacent buckets
//! are merged before being pushed, and ranges sharing a run of characters skip over
//! the whole run at once.
//!
//! The main entry points are [`msdsort`] and [`msdsort_partial`].

use crate::bucket::{BucketOutcome, Bucketizer};
use crate::config::SortConfig;
use crate::core::{SortKey, unit_at};
use crate::error::{Result, check_range};
use crate::merge::{RangeMerger, SortState};
use crate::small;
use log::debug;

const MIN_STACK_CAPACITY: usize = 16;

/// Sorts a slice of keys in place.
///
/// The sort is stable and uses the default [`SortConfig`].
///
/// # Examples
///
/// ```
/// use msdsort::msdsort;
///
/// let mut data = vec!["car", "care", "car", "ca"];
/// msdsort(&mut data);
///
/// assert_eq!(data, vec!["ca", "car", "car", "care"]);
/// ```
pub fn msdsort<T: SortKey>(data: &mut [T]) {
    MsdSorter::default().sort(data);
}

/// Sorts `data[from..to]` in place, leaving the rest of the slice untouched.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) when `from > to` or
/// `to > data.len()`. Nothing is moved in that case.
///
/// # Examples
///
/// ```
/// use msdsort::msdsort_range;
///
/// let mut data = vec!["z", "c", "b", "a", "y"];
/// msdsort_range(&mut data, 1, 4).unwrap();
/// assert_eq!(data, vec!["z", "a", "b", "c", "y"]);
///
/// assert!(msdsort_range(&mut data, 2, 9).is_err());
/// ```
pub fn msdsort_range<T: SortKey>(data: &mut [T], from: usize, to: usize) -> Result<()> {
    MsdSorter::default().sort_range(data, from, to)
}

/// Sorts a slice only as far as its first `min_chars` characters.
///
/// Two keys that differ within their first `min_chars` characters (or within their
/// whole length, if shorter) end up in the correct relative order. Keys sharing those
/// characters may be left in any order, so a comparison sort afterwards finishes the
/// job cheaply.
///
/// # Examples
///
/// ```
/// use msdsort::msdsort_partial;
///
/// let mut data = vec!["apricot", "apple", "appetizer"];
/// msdsort_partial(2, &mut data);
/// data.sort();
///
/// assert_eq!(data, vec!["appetizer", "apple", "apricot"]);
/// ```
pub fn msdsort_partial<T: SortKey>(min_chars: usize, data: &mut [T]) {
    MsdSorter::default().sort_partially(min_chars, data);
}

/// Range variant of [`msdsort_partial`].
///
/// # Errors
///
/// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) when `from > to` or
/// `to > data.len()`.
pub fn msdsort_partial_range<T: SortKey>(
    min_chars: usize,
    data: &mut [T],
    from: usize,
    to: usize,
) -> Result<()> {
    MsdSorter::default().sort_partially_range(min_chars, data, from, to)
}

/// An MSD sorter with custom tuning.
///
/// The free functions use `MsdSorter::default()`. Every call owns its own work stack
/// and scratch buffer, so one sorter can be shared freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct MsdSorter {
    config: SortConfig,
}

impl MsdSorter {
    /// Creates a sorter after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the thresholds
    /// are inconsistent, see [`SortConfig::validate`].
    pub fn new(config: SortConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sorts the whole slice.
    pub fn sort<T: SortKey>(&self, data: &mut [T]) {
        self.drive(usize::MAX, data);
    }

    /// Sorts `data[from..to]`.
    pub fn sort_range<T: SortKey>(&self, data: &mut [T], from: usize, to: usize) -> Result<()> {
        self.sort_partially_range(usize::MAX, data, from, to)
    }

    /// Sorts the whole slice as far as its first `min_chars` characters.
    pub fn sort_partially<T: SortKey>(&self, min_chars: usize, data: &mut [T]) {
        self.drive(min_chars, data);
    }

    /// Sorts `data[from..to]` as far as its first `min_chars` characters.
    pub fn sort_partially_range<T: SortKey>(
        &self,
        min_chars: usize,
        data: &mut [T],
        from: usize,
        to: usize,
    ) -> Result<()> {
        check_range(data.len(), from, to)?;
        self.drive(min_chars, &mut data[from..to]);
        Ok(())
    }

    fn drive<T: SortKey>(&self, min_chars: usize, data: &mut [T]) {
        let len = data.len();
        match len {
            0 | 1 => return,
            2 => return small::sort_two(data, 0),
            3 => return small::sort_three(data, 0),
            _ if len <= self.config.general_sort_threshold => {
                return small::suffix_sort(data, 0);
            }
            _ => {}
        }

        debug!("msdsort: sorting {} keys (min_chars: {})", len, min_chars);
        let mut driver = Driver::new(&self.config, len);
        driver.stack.push(SortState::new(0, len, 0, min_chars));
        while let Some(state) = driver.stack.pop() {
            driver.process(data, state);
        }
        debug!(
            "msdsort: finished {} keys, {} states processed, {} bucket passes, peak stack depth {}",
            len, driver.processed, driver.bucket_passes, driver.peak_depth
        );
    }
}

/// How far [`Driver::sort_part`] got with a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PartOutcome {
    /// Ordered on the whole remaining suffix.
    FullySorted,
    /// Ordered on the current character only; bucket edges still unknown.
    IndexSorted { max_len: Option<usize> },
    /// Ordered on the current character with bucket edges recorded.
    Bucketed { max_len: Option<usize> },
}

/// Work-stack driver for one top-level call.
struct Driver<'a> {
    config: &'a SortConfig,
    stack: Vec<SortState>,
    bucketizer: Bucketizer,
    /// Bucket starts of the range being split, relative to its start.
    edges: Vec<usize>,
    processed: usize,
    bucket_passes: usize,
    peak_depth: usize,
}

impl<'a> Driver<'a> {
    fn new(config: &'a SortConfig, len: usize) -> Self {
        let capacity = MIN_STACK_CAPACITY.max(ceil_log2(len));
        Self {
            config,
            stack: Vec::with_capacity(capacity),
            bucketizer: Bucketizer::with_capacity(len),
            edges: Vec::new(),
            processed: 0,
            bucket_passes: 0,
            peak_depth: 0,
        }
    }

    /// Handles one state, pushing whatever sub-problems remain.
    fn process<T: SortKey>(&mut self, data: &mut [T], mut state: SortState) {
        if state.is_exhausted() {
            return;
        }
        self.processed += 1;
        assert!(state.end <= data.len(), "state {:?} out of bounds", state);

        let mut track_max =
            state.max_index == usize::MAX || state.len() <= self.config.track_max_threshold;
        let (bucketed, max_len) = match self.sort_part(data, &state, track_max) {
            PartOutcome::FullySorted => return,
            PartOutcome::IndexSorted { max_len } => (false, max_len),
            PartOutcome::Bucketed { max_len } => (true, max_len),
        };
        if let Some(max_len) = max_len {
            state.max_index = state.max_index.min(max_len);
            track_max = state.len() < self.config.track_max_threshold;
        }
        if state.is_exhausted() {
            return;
        }

        let part = &data[state.start..state.end];
        let first = unit_at(part[0].units(), state.index);
        let last = unit_at(part[part.len() - 1].units(), state.index);
        if first == last {
            debug_assert!(!bucketed);
            if first.is_none() {
                // Every key ends here, so the suffixes are all equal.
                return;
            }
            let shared = small::shared_prefix_len(part, state.index + 1, state.max_index);
            state.index += shared + 1;
            self.push(state);
        } else {
            if !bucketed {
                collect_runs(part, state.index, &mut self.edges);
            }
            self.split(data, state, track_max);
        }
    }

    /// Sorts `state`'s range on its current character, picking a strategy by size.
    fn sort_part<T: SortKey>(
        &mut self,
        data: &mut [T],
        state: &SortState,
        track_max: bool,
    ) -> PartOutcome {
        let config = self.config;
        let index = state.index;
        let part = &mut data[state.start..state.end];
        let len = part.len();

        if len <= 1 {
            return PartOutcome::FullySorted;
        }
        if len == 2 {
            small::sort_two(part, index);
            return PartOutcome::FullySorted;
        }
        if len == 3 {
            small::sort_three(part, index);
            return PartOutcome::FullySorted;
        }
        if len <= config.insertion_threshold {
            small::insertion_sort(part, index);
            return PartOutcome::FullySorted;
        }
        if len <= config.general_sort_threshold {
            if state.max_index - index <= config.full_sort_remaining_threshold {
                small::suffix_sort(part, index);
                return PartOutcome::FullySorted;
            }
            small::unit_sort(part, index);
            return PartOutcome::IndexSorted { max_len: None };
        }

        self.bucket_passes += 1;
        match self
            .bucketizer
            .bucket_sort(part, index, track_max, &mut self.edges)
        {
            BucketOutcome::Uniform { max_len } | BucketOutcome::Sparse { max_len } => {
                PartOutcome::IndexSorted { max_len }
            }
            BucketOutcome::Split { max_len } => PartOutcome::Bucketed { max_len },
        }
    }

    /// Pushes the buckets recorded in `edges` as new states.
    ///
    /// Exhausted and single-element buckets are already in place, buckets of two or
    /// three are resolved immediately, and small neighbours are merged once the keys
    /// are close to running out.
    fn split<T: SortKey>(&mut self, data: &mut [T], state: SortState, track_max: bool) {
        let config = self.config;
        let index = state.index;
        let remaining = state.max_index - index;
        let should_merge = remaining < config.merge_remaining_threshold;
        let max_merged_len = if remaining < config.full_sort_remaining_threshold {
            config.general_sort_threshold
        } else {
            config.insertion_threshold
        };
        let mut merger = RangeMerger::new(max_merged_len);

        for n in 0..self.edges.len() {
            let start = state.start + self.edges[n];
            let end = self
                .edges
                .get(n + 1)
                .map_or(state.end, |&edge| state.start + edge);
            let bucket = &mut data[start..end];
            if bucket.len() <= 1 || unit_at(bucket[0].units(), index).is_none() {
                continue;
            }
            match bucket.len() {
                2 => small::sort_two(bucket, index + 1),
                3 => small::sort_three(bucket, index + 1),
                len => {
                    // Only worth scanning when the bucket will not end up in a full sort.
                    let block_max = if track_max && len > max_merged_len {
                        let longest = bucket.iter().map(|k| k.units().len()).max();
                        longest.map_or(state.max_index, |l| l.min(state.max_index))
                    } else {
                        state.max_index
                    };

                    if should_merge && len < config.insertion_threshold && len >= config.min_merge_len
                    {
                        merger.offer(SortState::new(start, end, index, block_max), &mut self.stack);
                    } else {
                        merger.flush(&mut self.stack);
                        self.push(SortState::new(start, end, index + 1, block_max));
                    }
                }
            }
        }
        merger.flush(&mut self.stack);
        self.peak_depth = self.peak_depth.max(self.stack.len());
    }

    fn push(&mut self, state: SortState) {
        if !state.is_exhausted() {
            self.stack.push(state);
            self.peak_depth = self.peak_depth.max(self.stack.len());
        }
    }
}

/// Records the start of every run of equal characters at `index`.
fn collect_runs<T: SortKey>(part: &[T], index: usize, edges: &mut Vec<usize>) {
    edges.clear();
    edges.push(0);
    for i in 1..part.len() {
        if unit_at(part[i].units(), index) != unit_at(part[i - 1].units(), index) {
            edges.push(i);
        }
    }
}

/// `ceil(log2(n))`, with `ceil_log2(0) == ceil_log2(1) == 0`.
fn ceil_log2(n: usize) -> usize {
    match n {
        0 | 1 => 0,
        _ => (usize::BITS - (n - 1).leading_zeros()) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(1024), 10);
        assert_eq!(ceil_log2(1025), 11);
    }

    #[test]
    fn test_collect_runs() {
        let part = ["a", "ab", "b", "bb", "", "c"];
        let mut edges = Vec::new();
        collect_runs(&part, 0, &mut edges);
        assert_eq!(edges, vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_shared_prefix_collapse() {
        let config = SortConfig::default();
        let prefix = "x".repeat(40);
        let mut data: Vec<String> = (0..64).rev().map(|i| format!("{prefix}{i:03}")).collect();
        let mut expected = data.clone();
        expected.sort();

        let mut driver = Driver::new(&config, data.len());
        driver.stack.push(SortState::new(0, data.len(), 0, usize::MAX));
        while let Some(state) = driver.stack.pop() {
            driver.process(&mut data, state);
        }

        assert_eq!(data, expected);
        // The 40 shared characters are skipped in one step, not one pass each.
        assert!(driver.bucket_passes <= 3, "{} passes", driver.bucket_passes);
    }

    #[test]
    fn test_partial_stops_at_bound() {
        let config = SortConfig::default();
        let mut data: Vec<String> = (0..100).rev().map(|i| format!("k{i:03}")).collect();
        let original = data.clone();

        let mut driver = Driver::new(&config, data.len());
        driver.stack.push(SortState::new(0, data.len(), 0, 1));
        while let Some(state) = driver.stack.pop() {
            driver.process(&mut data, state);
        }

        // All keys share their first character, so nothing moves.
        assert_eq!(data, original);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SortConfig::default()
            .with_insertion_threshold(64)
            .with_general_sort_threshold(32);
        assert!(MsdSorter::new(config).is_err());
    }
}
