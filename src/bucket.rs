//! Counting pass on a single character position.
//!
//! The bucketizer distributes a range by the character at one index:
//!
//! 1. Finds the lowest and highest slot present (slot 0 is reserved for exhausted keys).
//! 2. Counts every slot relative to the lowest one and computes prefix sums to find
//!    where each bucket starts.
//! 3. Writes each element's destination into the scratch buffer and applies that
//!    permutation in place.
//!
//! The count table only spans the observed slots, so its size follows the range and
//! not the magnitude of the code units. When the observed slots are spread far wider
//! than the range is long, a comparison sort on the character is used instead.
//!
//! The counting is stable, so elements sharing a character keep their relative order.

use crate::core::{CodeUnit, SortKey, unit_at};
use crate::small;
use cuneiform::cuneiform;
use log::trace;

/// Slots kept in the inline table: the exhausted slot plus every byte value.
const INLINE_SLOTS: usize = 257;
/// Extra spill slots allocated whenever the spill table has to grow.
const SPILL_SLACK: usize = 20;
/// Spill slots retained between passes; anything larger is released.
const SPILL_RETAIN: usize = 1 << 12;
/// Slot spans wider than this many slots per key are sorted by comparison.
const SPARSE_FACTOR: usize = 4;

/// Counting slot of a key at `index`: 0 when exhausted, `unit.slot() + 1` otherwise.
#[inline(always)]
fn slot_of<T: SortKey>(key: &T, index: usize) -> usize {
    match unit_at(key.units(), index) {
        Some(unit) => unit.slot() + 1,
        None => 0,
    }
}

// Cache-aligned counts with a growable spill area for wide spans.
// Indexed by slot relative to the lowest slot of the current pass.
#[cuneiform]
struct CountTable {
    inline: [usize; INLINE_SLOTS],
    spill: Vec<usize>,
}

impl CountTable {
    fn new() -> Self {
        Self {
            inline: [0; INLINE_SLOTS],
            spill: Vec::new(),
        }
    }

    /// Makes room for relative slots `0..span`.
    fn reserve(&mut self, span: usize) {
        if span > INLINE_SLOTS + self.spill.len() {
            self.spill.resize(span - INLINE_SLOTS + SPILL_SLACK, 0);
        }
    }

    #[inline(always)]
    fn bump(&mut self, slot: usize) {
        if slot < INLINE_SLOTS {
            self.inline[slot] += 1;
        } else {
            self.spill[slot - INLINE_SLOTS] += 1;
        }
    }

    /// Returns the count of `slot` and resets it to zero.
    #[inline(always)]
    fn take(&mut self, slot: usize) -> usize {
        if slot < INLINE_SLOTS {
            std::mem::take(&mut self.inline[slot])
        } else {
            std::mem::take(&mut self.spill[slot - INLINE_SLOTS])
        }
    }

    /// Releases spill memory grown by an unusually wide span.
    fn relax(&mut self) {
        if self.spill.len() > SPILL_RETAIN {
            self.spill.truncate(SPILL_RETAIN);
            self.spill.shrink_to_fit();
        }
    }
}

/// Result of a counting pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BucketOutcome {
    /// Every key has the same character (or is exhausted) at the index. Nothing moved.
    Uniform { max_len: Option<usize> },
    /// The range was redistributed; bucket starts were written to `edges`.
    Split { max_len: Option<usize> },
    /// The characters were too spread out to count. The range was ordered by a
    /// comparison sort on the character and `edges` was left untouched.
    Sparse { max_len: Option<usize> },
}

/// Reusable state for counting passes within one top-level sort.
pub(crate) struct Bucketizer {
    counts: CountTable,
    offsets: Vec<usize>,
    scratch: Vec<usize>,
}

impl Bucketizer {
    /// Creates a bucketizer whose scratch buffer can hold `capacity` destinations.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: CountTable::new(),
            offsets: Vec::new(),
            scratch: Vec::with_capacity(capacity),
        }
    }

    /// Bucket sorts `part` by the character at `index`.
    ///
    /// On `Split`, `edges` holds the start offset (relative to `part`) of every
    /// non-empty bucket in ascending order. With `track_max` set, the longest key length
    /// seen is reported so the caller can tighten its character bound.
    pub(crate) fn bucket_sort<T: SortKey>(
        &mut self,
        part: &mut [T],
        index: usize,
        track_max: bool,
        edges: &mut Vec<usize>,
    ) -> BucketOutcome {
        let mut min_slot = usize::MAX;
        let mut max_slot = 0;
        let mut max_len = 0;

        // 1. Slot bounds
        part.iter().for_each(|key| {
            if track_max {
                max_len = max_len.max(key.units().len());
            }
            let slot = slot_of(key, index);
            min_slot = min_slot.min(slot);
            max_slot = max_slot.max(slot);
        });
        let max_len = track_max.then_some(max_len);

        if part.is_empty() || min_slot == max_slot {
            return BucketOutcome::Uniform { max_len };
        }

        let span = max_slot - min_slot + 1;
        if span > INLINE_SLOTS && span > SPARSE_FACTOR * part.len() {
            small::unit_sort(part, index);
            trace!(
                "sparse pass: {} keys at index {} span {} slots, sorted by comparison",
                part.len(),
                index,
                span
            );
            return BucketOutcome::Sparse { max_len };
        }

        // 2. Histogram and prefix sums
        self.counts.reserve(span);
        part.iter()
            .for_each(|key| self.counts.bump(slot_of(key, index) - min_slot));

        self.offsets.clear();
        edges.clear();
        let mut sum = 0;
        for slot in 0..span {
            let count = self.counts.take(slot);
            if count > 0 {
                edges.push(sum);
            }
            self.offsets.push(sum);
            sum += count;
        }
        debug_assert_eq!(sum, part.len(), "bucket counts do not cover the range");

        // 3. Destinations, then permute in place
        self.scratch.clear();
        part.iter().for_each(|key| {
            let offset = &mut self.offsets[slot_of(key, index) - min_slot];
            self.scratch.push(*offset);
            *offset += 1;
        });
        apply_permutation(part, &mut self.scratch);

        trace!(
            "bucket pass: {} keys at index {} into {} buckets (slots {}..={})",
            part.len(),
            index,
            edges.len(),
            min_slot,
            max_slot
        );
        self.counts.relax();
        BucketOutcome::Split { max_len }
    }
}

/// Moves every element `i` to position `dest[i]`.
///
/// `dest` must be a permutation of `0..data.len()`; it is consumed (left as the
/// identity) in the process.
fn apply_permutation<T>(data: &mut [T], dest: &mut [usize]) {
    debug_assert_eq!(data.len(), dest.len());
    for i in 0..data.len() {
        while dest[i] != i {
            let target = dest[i];
            data.swap(i, target);
            dest.swap(i, target);
        }
    }
}
