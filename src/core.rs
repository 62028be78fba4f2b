//! Core traits and helpers for key access.
//!
//! This module defines:
//! - [`CodeUnit`]: a single "character" of a key (a byte, a UTF-16 unit, a `char`, ...).
//! - [`SortKey`]: the trait elements implement so `msdsort` can look at their characters.
//! - [`compare_suffixes`]: the suffix comparator every terminal comparison sort is built on.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

/// A single code unit of a key.
///
/// `slot` maps a unit onto a dense counting index used by the bucket pass. It must be
/// monotonic with respect to `Ord`, i.e. `a < b` implies `a.slot() < b.slot()`.
pub trait CodeUnit: Copy + Ord + Debug {
    fn slot(self) -> usize;
}

impl CodeUnit for u8 {
    #[inline(always)]
    fn slot(self) -> usize {
        self as usize
    }
}

impl CodeUnit for u16 {
    #[inline(always)]
    fn slot(self) -> usize {
        self as usize
    }
}

impl CodeUnit for u32 {
    #[inline(always)]
    fn slot(self) -> usize {
        self as usize
    }
}

impl CodeUnit for char {
    #[inline(always)]
    fn slot(self) -> usize {
        self as usize
    }
}

/// A trait for exposing the characters of an element without copying.
///
/// `msdsort` reorders a slice of `SortKey`s in place by the lexicographic order of
/// their [`units`](SortKey::units). Strings sort by their UTF-8 bytes, which gives the
/// same order as `Ord for str`.
///
/// # Examples
///
/// Sorting records by one of their fields:
///
/// ```
/// use msdsort::{msdsort, SortKey};
///
/// struct User {
///     username: String,
///     id: u32,
/// }
///
/// impl SortKey for User {
///     type Unit = u8;
///
///     fn units(&self) -> &[u8] {
///         self.username.as_bytes()
///     }
/// }
///
/// let mut users = vec![
///     User { username: "bob".to_string(), id: 1 },
///     User { username: "alice".to_string(), id: 2 },
/// ];
/// msdsort(&mut users);
///
/// assert_eq!(users[0].id, 2);
/// ```
pub trait SortKey {
    /// The character type of the key.
    type Unit: CodeUnit;

    /// Returns the characters of the key.
    fn units(&self) -> &[Self::Unit];
}

impl SortKey for str {
    type Unit = u8;

    #[inline(always)]
    fn units(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl SortKey for String {
    type Unit = u8;

    #[inline(always)]
    fn units(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<U: CodeUnit> SortKey for [U] {
    type Unit = U;

    #[inline(always)]
    fn units(&self) -> &[U] {
        self
    }
}

impl<U: CodeUnit> SortKey for Vec<U> {
    type Unit = U;

    #[inline(always)]
    fn units(&self) -> &[U] {
        self
    }
}

impl<U: CodeUnit, const N: usize> SortKey for [U; N] {
    type Unit = U;

    #[inline(always)]
    fn units(&self) -> &[U] {
        self
    }
}

// Forwarding impls so slices of borrowed or shared keys sort the same as owned ones.
impl<K: SortKey + ?Sized> SortKey for &K {
    type Unit = K::Unit;

    #[inline(always)]
    fn units(&self) -> &[K::Unit] {
        (**self).units()
    }
}

impl<K: SortKey + ?Sized> SortKey for Box<K> {
    type Unit = K::Unit;

    #[inline(always)]
    fn units(&self) -> &[K::Unit] {
        (**self).units()
    }
}

impl<K: SortKey + ?Sized> SortKey for Rc<K> {
    type Unit = K::Unit;

    #[inline(always)]
    fn units(&self) -> &[K::Unit] {
        (**self).units()
    }
}

impl<K: SortKey + ?Sized> SortKey for Arc<K> {
    type Unit = K::Unit;

    #[inline(always)]
    fn units(&self) -> &[K::Unit] {
        (**self).units()
    }
}

/// Returns the unit at `index`, or `None` once the key is exhausted.
///
/// `None` orders before every `Some`, so an exhausted key sorts before any key that
/// still has characters at this position.
#[inline(always)]
pub fn unit_at<U: CodeUnit>(units: &[U], index: usize) -> Option<U> {
    units.get(index).copied()
}

/// Compares two keys by their suffixes starting at `index`.
///
/// Characters before `index` are assumed equal and are not looked at. A key that is
/// exhausted at `index` compares as smallest; otherwise the comparison is lexicographic
/// with a proper prefix ordering first.
///
/// # Examples
///
/// ```
/// use msdsort::compare_suffixes;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_suffixes(b"car", b"care", 1), Ordering::Less);
/// assert_eq!(compare_suffixes(b"xa", b"ya", 1), Ordering::Equal);
/// assert_eq!(compare_suffixes(b"ab", b"a", 1), Ordering::Greater);
/// ```
#[inline(always)]
pub fn compare_suffixes<U: CodeUnit>(a: &[U], b: &[U], index: usize) -> Ordering {
    let a = a.get(index..).unwrap_or(&[]);
    let b = b.get(index..).unwrap_or(&[]);
    a.cmp(b)
}

/// [`compare_suffixes`] lifted to whole elements.
#[inline(always)]
pub(crate) fn compare_keys<T: SortKey + ?Sized>(a: &T, b: &T, index: usize) -> Ordering {
    compare_suffixes(a.units(), b.units(), index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_at_exhausted() {
        assert_eq!(unit_at(b"ab", 1), Some(b'b'));
        assert_eq!(unit_at(b"ab", 2), None);
        assert!(unit_at::<u8>(b"", 0) < Some(0));
    }

    #[test]
    fn test_compare_suffixes_embedded_zero() {
        // A real zero unit is still data, not end-of-key.
        assert_eq!(compare_suffixes(b"a", b"a\0", 0), Ordering::Less);
        assert_eq!(compare_suffixes(b"a\0", b"a\0", 0), Ordering::Equal);
        assert_eq!(compare_suffixes(b"", b"", 3), Ordering::Equal);
    }

    #[test]
    fn test_forwarding_impls() {
        let owned = String::from("key");
        let boxed: Box<str> = "key".into();
        let shared: Arc<str> = Arc::from("key");
        assert_eq!(owned.units(), boxed.units());
        assert_eq!((&owned).units(), shared.units());
        assert_eq!(['k', 'e', 'y'].units(), &['k', 'e', 'y']);
    }
}
