//! # msdsort
//!
//! `msdsort` is an adaptive, in-place **most-significant-digit (MSD) radix sort** for
//! strings, byte strings and other keys made of ordered code units.
//!
//! It orders keys by their leftmost unresolved character first and keeps refining the
//! resulting buckets, switching strategy per sub-range:
//!
//! - **Counting passes** for large ranges, linear in the number of keys.
//! - **Comparison sorts** for small ranges, where setting up a counting pass costs more
//!   than it saves, and for ranges whose keys are about to run out.
//! - **Inline resolvers** for ranges of two or three keys.
//!
//! ## Key Features
//!
//! - **No recursion**: pending ranges live on an explicit work stack, so arbitrarily
//!   long shared prefixes cannot overflow the call stack.
//! - **Prefix skipping**: when every key in a range shares a run of characters, the
//!   whole run is skipped in one step.
//! - **Range merging**: small adjacent buckets are combined and finished together.
//! - **Explicit lengths**: a key running out is tracked separately from its characters,
//!   so `"\0"` is ordinary data and sorts after `""`.
//! - **Partial sorting**: [`msdsort_partial`] orders keys by their first `min_chars`
//!   characters only, leaving a cheap finishing pass for a comparison sort.
//! - **Stable**: equal keys keep their relative order.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use msdsort::msdsort;
//!
//! let mut data = vec!["banana", "apple", "cherry", "date"];
//! msdsort(&mut data);
//!
//! assert_eq!(data, vec!["apple", "banana", "cherry", "date"]);
//! ```
//!
//! ### Partial sort followed by a finishing pass
//!
//! ```rust
//! use msdsort::msdsort_partial;
//!
//! let mut data = vec!["apricot", "apple", "appetizer", "banana"];
//! msdsort_partial(2, &mut data);
//! data.sort();
//!
//! assert_eq!(data, vec!["appetizer", "apple", "apricot", "banana"]);
//! ```
//!
//! ### Custom Types
//!
//! Implement [`SortKey`] to sort records by one of their fields. See the trait docs for
//! an example. Thresholds can be tuned through [`SortConfig`] and [`MsdSorter`].
//!
//! ## Performance Characteristics
//!
//! - **Time**: O(N + D) character inspections for the counting passes, where D is the
//!   total length of the distinguishing prefixes, plus small comparison sorts at the
//!   leaves.
//! - **Memory Overhead**: one `usize` per key for the scratch buffer, plus a count table
//!   sized to the observed alphabet.

pub mod algo;
mod bucket;
pub mod config;
pub mod core;
pub mod error;
mod merge;
mod small;

pub use crate::algo::{
    MsdSorter, msdsort, msdsort_partial, msdsort_partial_range, msdsort_range,
};
pub use crate::config::SortConfig;
pub use crate::core::{CodeUnit, SortKey, compare_suffixes, unit_at};
pub use crate::error::{Error, Result};

pub mod prelude {
    pub use crate::algo::{
        MsdSorter, msdsort, msdsort_partial, msdsort_partial_range, msdsort_range,
    };
    pub use crate::config::SortConfig;
    pub use crate::core::SortKey;
}
