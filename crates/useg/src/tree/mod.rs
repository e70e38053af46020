use core::fmt;

use crate::{Error, aggregator::Aggregator};

mod any;
/// Recursive segment tree stored in a flat array
pub mod array;
/// Recursive segment tree with owned child nodes
pub mod node;
/// Iterative bottom-up segment tree
pub mod non_recursive;

pub use any::AnySegmentTree;

/// Range queries over a fixed-length source sequence
///
/// All bounds are 0-based and inclusive.
pub trait RangeQuery<A: Aggregator> {
    /// Returns the number of elements in the source sequence
    fn len(&self) -> usize;

    /// Returns `true` if the tree holds no elements, which never happens for a built tree
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combines the partial aggregates of `[start, end]` from left to right
    fn query_partial(&self, start: usize, end: usize) -> Result<A::PartialAggregate, Error>;

    /// Returns the lowered aggregate of `[start, end]`
    #[inline]
    fn query(&self, start: usize, end: usize) -> Result<A::Aggregate, Error> {
        self.query_partial(start, end).map(A::lower)
    }
}

/// Point-wise updates of the source sequence
pub trait RangeUpdate<A: Aggregator>: RangeQuery<A> {
    /// Replaces every value `v` in `[start, end]` with `updater(v)`
    fn update_range<F>(&mut self, start: usize, end: usize, updater: F) -> Result<(), Error>
    where
        F: Fn(A::Input) -> A::Input;

    /// Replaces the value `v` at `index` with `updater(v)`
    #[inline]
    fn update<F>(&mut self, index: usize, updater: F) -> Result<(), Error>
    where
        F: Fn(A::Input) -> A::Input,
    {
        self.update_range(index, index, updater)
    }
}

/// The backing representation of a generic segment tree
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backing {
    /// [array::ArrayBasedSegmentTree]
    #[default]
    ArrayBased,
    /// [node::NodeBasedSegmentTree]
    NodeBased,
    /// [non_recursive::NonRecursiveSegmentTree]
    ///
    /// This backing only supports queries.
    NonRecursive,
}

impl Backing {
    /// Every available backing
    pub const ALL: [Backing; 3] = [Backing::ArrayBased, Backing::NodeBased, Backing::NonRecursive];

    /// Returns `true` if trees of this backing support [RangeUpdate]
    pub fn supports_update(&self) -> bool {
        !matches!(self, Backing::NonRecursive)
    }
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backing::ArrayBased => write!(f, "array-based"),
            Backing::NodeBased => write!(f, "node-based"),
            Backing::NonRecursive => write!(f, "non-recursive"),
        }
    }
}
