//! Error type shared by the sorting entry points.

use std::fmt;

/// Errors reported by `msdsort`.
///
/// Both variants are detected before any element is moved, so the input is
/// left untouched when one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested `[from, to)` range does not fit the slice.
    InvalidRange { from: usize, to: usize, len: usize },
    /// A [`SortConfig`](crate::config::SortConfig) failed validation.
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { from, to, len } if to > len => {
                write!(f, "range end {to} out of bounds for slice of length {len} (start {from})")
            }
            Error::InvalidRange { from, to, .. } => {
                write!(f, "range start {from} is greater than range end {to}")
            }
            Error::InvalidConfig(reason) => write!(f, "invalid sort configuration: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

/// Checks that `[from, to)` lies within a slice of length `len`.
pub(crate) fn check_range(len: usize, from: usize, to: usize) -> Result<()> {
    if to > len || from > to {
        return Err(Error::InvalidRange { from, to, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert!(check_range(5, 0, 5).is_ok());
        assert!(check_range(5, 5, 5).is_ok());
        assert!(check_range(0, 0, 0).is_ok());
        assert_eq!(
            check_range(5, 0, 6),
            Err(Error::InvalidRange { from: 0, to: 6, len: 5 })
        );
        assert_eq!(
            check_range(5, 3, 2),
            Err(Error::InvalidRange { from: 3, to: 2, len: 5 })
        );
    }

    #[test]
    fn test_display() {
        let end = Error::InvalidRange { from: 0, to: 6, len: 5 };
        assert_eq!(
            end.to_string(),
            "range end 6 out of bounds for slice of length 5 (start 0)"
        );
        let order = Error::InvalidRange { from: 3, to: 2, len: 5 };
        assert_eq!(order.to_string(), "range start 3 is greater than range end 2");
    }
}
