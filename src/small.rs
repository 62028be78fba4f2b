//! Terminal strategies for small ranges.
//!
//! Everything here is stable: elements are only exchanged when the left one compares
//! strictly greater.

use crate::core::{SortKey, compare_keys, unit_at};
use std::cmp::Ordering::Greater;

/// Orders two elements by their suffixes starting at `index`.
#[inline]
pub(crate) fn sort_two<T: SortKey>(v: &mut [T], index: usize) {
    debug_assert_eq!(v.len(), 2);
    if compare_keys(&v[0], &v[1], index) == Greater {
        v.swap(0, 1);
    }
}

/// Orders three elements with at most three comparisons.
// Decision tree adapted from The Art of Computer Programming, vol. 3.
#[inline]
pub(crate) fn sort_three<T: SortKey>(v: &mut [T], index: usize) {
    debug_assert_eq!(v.len(), 3);
    if compare_keys(&v[0], &v[1], index) == Greater {
        if compare_keys(&v[1], &v[2], index) == Greater {
            // c < b < a
            v.swap(0, 2);
        } else if compare_keys(&v[0], &v[2], index) == Greater {
            // b <= c < a
            v.rotate_left(1);
        } else {
            // b < a <= c
            v.swap(0, 1);
        }
    } else if compare_keys(&v[1], &v[2], index) == Greater {
        if compare_keys(&v[0], &v[2], index) == Greater {
            // c < a <= b
            v.rotate_right(1);
        } else {
            // a <= c < b
            v.swap(1, 2);
        }
    }
}

/// Stable insertion sort on full suffixes.
pub(crate) fn insertion_sort<T: SortKey>(v: &mut [T], index: usize) {
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && compare_keys(&v[j - 1], &v[j], index) == Greater {
            v.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Stable comparison sort on full suffixes. Final for the range.
pub(crate) fn suffix_sort<T: SortKey>(v: &mut [T], index: usize) {
    v.sort_by(|a, b| compare_keys(a, b, index));
}

/// Stable comparison sort on the single character at `index`.
///
/// Leaves runs of equal characters that still need to be split.
pub(crate) fn unit_sort<T: SortKey>(v: &mut [T], index: usize) {
    v.sort_by_key(|k| unit_at(k.units(), index));
}

/// Length of the common run of characters shared by every element, starting at
/// `index` and bounded by `max_index`.
pub(crate) fn shared_prefix_len<T: SortKey>(v: &[T], index: usize, max_index: usize) -> usize {
    let Some((first, rest)) = v.split_first() else {
        return 0;
    };
    let probe = first.units();
    let limit = max_index.min(probe.len());
    if index >= limit {
        return 0;
    }
    let Some((last, middle)) = rest.split_last() else {
        return limit - index;
    };

    for i in index..limit {
        let unit = Some(probe[i]);
        // The last element is the likeliest to differ, so it is checked first.
        if unit_at(last.units(), i) != unit
            || middle.iter().any(|k| unit_at(k.units(), i) != unit)
        {
            return i - index;
        }
    }
    limit - index
}
