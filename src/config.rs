//! Tuning thresholds for the MSD sorter.
//!
//! The defaults were picked empirically on mixed text workloads. They trade the setup
//! cost of a counting pass against comparison sorts that look at every remaining
//! character, so the best values depend on key length and platform.

use crate::error::{Error, Result};

const DEFAULT_INSERTION_THRESHOLD: usize = 16;
const DEFAULT_GENERAL_SORT_THRESHOLD: usize = 31;
// Roughly 1.4x the general sort threshold.
const DEFAULT_TRACK_MAX_THRESHOLD: usize = 43;
const DEFAULT_MIN_MERGE_LEN: usize = 4;
const DEFAULT_MERGE_REMAINING_THRESHOLD: usize = 18;
const DEFAULT_FULL_SORT_REMAINING_THRESHOLD: usize = 8;

/// Thresholds steering how the sorter handles each sub-range.
///
/// Build one with [`SortConfig::default`] and the setters, then hand it to
/// [`MsdSorter::new`](crate::MsdSorter::new), which validates it.
///
/// ```
/// use msdsort::{MsdSorter, SortConfig};
///
/// let config = SortConfig::default()
///     .with_insertion_threshold(8)
///     .with_general_sort_threshold(24);
/// let sorter = MsdSorter::new(config).unwrap();
///
/// let mut data = vec!["pear", "fig", "apple"];
/// sorter.sort(&mut data);
/// assert_eq!(data, vec!["apple", "fig", "pear"]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    pub(crate) insertion_threshold: usize,
    pub(crate) general_sort_threshold: usize,
    pub(crate) track_max_threshold: usize,
    pub(crate) min_merge_len: usize,
    pub(crate) merge_remaining_threshold: usize,
    pub(crate) full_sort_remaining_threshold: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            insertion_threshold: DEFAULT_INSERTION_THRESHOLD,
            general_sort_threshold: DEFAULT_GENERAL_SORT_THRESHOLD,
            track_max_threshold: DEFAULT_TRACK_MAX_THRESHOLD,
            min_merge_len: DEFAULT_MIN_MERGE_LEN,
            merge_remaining_threshold: DEFAULT_MERGE_REMAINING_THRESHOLD,
            full_sort_remaining_threshold: DEFAULT_FULL_SORT_REMAINING_THRESHOLD,
        }
    }
}

impl SortConfig {
    /// Ranges up to this length are finished with a stable insertion sort over the
    /// full remaining suffixes. Default: 16.
    ///
    /// Every comparison may look at all remaining characters, so setting this too
    /// high gives away the advantage of the radix passes.
    pub fn with_insertion_threshold(mut self, value: usize) -> Self {
        self.insertion_threshold = value;
        self
    }

    /// Ranges up to this length are handled by a comparison sort instead of a
    /// counting pass. Default: 31.
    ///
    /// When few characters remain the comparison sort is final, otherwise it only
    /// orders by the current character and the buckets are split afterwards.
    pub fn with_general_sort_threshold(mut self, value: usize) -> Self {
        self.general_sort_threshold = value;
        self
    }

    /// Ranges up to this length record the longest key they contain, tightening the
    /// character bound for their children. Default: 43.
    pub fn with_track_max_threshold(mut self, value: usize) -> Self {
        self.track_max_threshold = value;
        self
    }

    /// Buckets shorter than this are never merged with their neighbours. Default: 4.
    pub fn with_min_merge_len(mut self, value: usize) -> Self {
        self.min_merge_len = value;
        self
    }

    /// Adjacent small buckets are merged once fewer than this many characters remain
    /// before the keys run out. Default: 18.
    pub fn with_merge_remaining_threshold(mut self, value: usize) -> Self {
        self.merge_remaining_threshold = value;
        self
    }

    /// Once at most this many characters remain, mid-sized ranges are sorted by their
    /// full suffixes and merges may grow up to the general sort threshold.
    /// Default: 8.
    pub fn with_full_sort_remaining_threshold(mut self, value: usize) -> Self {
        self.full_sort_remaining_threshold = value;
        self
    }

    pub fn insertion_threshold(&self) -> usize {
        self.insertion_threshold
    }

    pub fn general_sort_threshold(&self) -> usize {
        self.general_sort_threshold
    }

    pub fn track_max_threshold(&self) -> usize {
        self.track_max_threshold
    }

    pub fn min_merge_len(&self) -> usize {
        self.min_merge_len
    }

    pub fn merge_remaining_threshold(&self) -> usize {
        self.merge_remaining_threshold
    }

    pub fn full_sort_remaining_threshold(&self) -> usize {
        self.full_sort_remaining_threshold
    }

    /// Checks the relations between thresholds the sorter relies on.
    ///
    /// A merged range keeps the character index it was split on, so it must always
    /// land in a terminal comparison sort. That holds only while the insertion
    /// threshold does not exceed the general sort threshold.
    pub fn validate(&self) -> Result<()> {
        if self.insertion_threshold > self.general_sort_threshold {
            return Err(Error::InvalidConfig(
                "insertion_threshold must not exceed general_sort_threshold",
            ));
        }
        if self.full_sort_remaining_threshold > self.merge_remaining_threshold {
            return Err(Error::InvalidConfig(
                "full_sort_remaining_threshold must not exceed merge_remaining_threshold",
            ));
        }
        if self.min_merge_len < 2 {
            return Err(Error::InvalidConfig("min_merge_len must be at least 2"));
        }
        Ok(())
    }
}
