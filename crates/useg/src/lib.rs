//! µseg is a segment tree engine built around a pluggable combine algebra.
//!
//! Every tree in this crate answers inclusive range queries `(start, end) -> aggregate` over a
//! fixed-length source sequence. What an aggregate is and how two adjacent aggregates are merged
//! is decided by an [Aggregator], which makes it possible to swap the backing representation
//! without touching the aggregation logic.
//!
//! The following backings are available:
//!
//! - [ArrayBasedSegmentTree]: a complete binary tree stored in one flat allocation and traversed
//!   recursively. Supports queries and point-wise range updates.
//! - [NodeBasedSegmentTree]: the same recursive algorithm over explicitly owned child nodes.
//! - [NonRecursiveSegmentTree]: an iterative bottom-up tree that only supports queries.
//! - [LazySumSegmentTree]: a specialized SUM tree that supports range additions in `O(log n)`.
//!
//! # Example
//!
//! ```
//! use useg::{aggregator::sum::I64SumAggregator, ArrayBasedSegmentTree, RangeQuery, RangeUpdate};
//!
//! let mut tree = ArrayBasedSegmentTree::<I64SumAggregator>::new(&[1, 2, 3, 4, 5]).unwrap();
//! assert_eq!(tree.query(0, 4), Ok(15));
//! assert_eq!(tree.query(1, 3), Ok(9));
//!
//! tree.update(2, |x| x + 10).unwrap();
//! assert_eq!(tree.query(0, 4), Ok(25));
//! assert_eq!(tree.query(2, 2), Ok(13));
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(nonstandard_style, missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

use core::{fmt, fmt::Display};

/// Aggregation interface shared by every tree in this crate
///
/// This module also contains the pre-defined aggregators (e.g., SUM, MIN, MAX, max subarray sum)
pub mod aggregator;
/// Range-add / range-sum tree with deferred delta propagation
pub mod lazy;
/// Linear-scan reference implementations used to validate the trees
pub mod naive;
/// Segment bounds and the overlap predicates that drive every descent
pub mod segment;
/// Generic segment tree backings
pub mod tree;

#[cfg(feature = "profiler")]
/// Latency statistics recorded when the `profiler` feature is enabled
pub mod stats;

pub use aggregator::{Aggregator, QueryObject};
pub use lazy::LazySumSegmentTree;
pub use segment::Segment;
pub use tree::{
    AnySegmentTree,
    Backing,
    RangeQuery,
    RangeUpdate,
    array::ArrayBasedSegmentTree,
    node::NodeBasedSegmentTree,
    non_recursive::NonRecursiveSegmentTree,
};

/// A type containing error variants that may arise when building or accessing a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A tree cannot be built over an empty source sequence
    Empty,
    /// The requested inclusive range is not within `0..len` or `start > end`
    InvalidRange {
        /// First index of the requested range
        start: usize,
        /// Last index of the requested range
        end: usize,
        /// Length of the source sequence
        len: usize,
    },
    /// The selected backing does not support the requested operation
    Unsupported {
        /// The backing that rejected the operation
        backing: Backing,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "cannot build a segment tree over an empty sequence"),
            Error::InvalidRange { start, end, len } => {
                write!(
                    f,
                    "invalid range [{start}, {end}] for a sequence of length {len}"
                )
            }
            Error::Unsupported { backing } => {
                write!(f, "the {backing} backing does not support updates")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Returns `true` if the error represents [Error::Empty]
    pub fn is_empty_source(&self) -> bool {
        matches!(self, Error::Empty)
    }
    /// Returns `true` if the error represents [Error::InvalidRange]
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Error::InvalidRange { .. })
    }
    /// Returns `true` if the error represents [Error::Unsupported]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }
}

/// Validates an inclusive `[start, end]` range against a sequence of `len` elements
#[inline]
pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<(), Error> {
    if start > end || end >= len {
        log::debug!("rejecting range [{start}, {end}] for length {len}");
        Err(Error::InvalidRange { start, end, len })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_checks() {
        assert_eq!(check_range(0, 0, 1), Ok(()));
        assert_eq!(check_range(2, 4, 5), Ok(()));
        assert!(check_range(3, 2, 5).unwrap_err().is_invalid_range());
        assert!(check_range(0, 5, 5).unwrap_err().is_invalid_range());
        assert!(check_range(0, 0, 0).unwrap_err().is_invalid_range());
    }

    #[cfg(feature = "std")]
    #[test]
    fn error_display() {
        let err = Error::InvalidRange {
            start: 3,
            end: 7,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid range [3, 7] for a sequence of length 5"
        );
        let err = Error::Unsupported {
            backing: Backing::NonRecursive,
        };
        assert_eq!(
            err.to_string(),
            "the non-recursive backing does not support updates"
        );
    }
}
