use super::{
    Backing,
    RangeQuery,
    RangeUpdate,
    array::ArrayBasedSegmentTree,
    node::NodeBasedSegmentTree,
    non_recursive::NonRecursiveSegmentTree,
};
use crate::{Error, aggregator::Aggregator};

/// A segment tree whose backing is chosen at runtime
///
/// Calls are forwarded through a `match`, so every backing stays monomorphized.
/// Updates on a [Backing::NonRecursive] tree are rejected with [Error::Unsupported].
///
/// # Example
///
/// ```
/// use useg::{aggregator::sum::I64SumAggregator, AnySegmentTree, Backing, RangeQuery, RangeUpdate};
///
/// let mut tree = AnySegmentTree::<I64SumAggregator>::with_backing(&[1, 2, 3], Backing::NodeBased).unwrap();
/// tree.update(0, |x| x + 1).unwrap();
/// assert_eq!(tree.query(0, 2), Ok(7));
///
/// let mut tree = AnySegmentTree::<I64SumAggregator>::with_backing(&[1, 2, 3], Backing::NonRecursive).unwrap();
/// assert!(tree.update(0, |x| x + 1).unwrap_err().is_unsupported());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug, Clone)]
pub enum AnySegmentTree<A: Aggregator> {
    /// An [ArrayBasedSegmentTree]
    ArrayBased(ArrayBasedSegmentTree<A>),
    /// A [NodeBasedSegmentTree]
    NodeBased(NodeBasedSegmentTree<A>),
    /// A [NonRecursiveSegmentTree]
    NonRecursive(NonRecursiveSegmentTree<A>),
}

impl<A: Aggregator> AnySegmentTree<A> {
    /// Builds a tree over `source` using the default backing
    pub fn new(source: &[A::Input]) -> Result<Self, Error> {
        Self::with_backing(source, Backing::default())
    }

    /// Builds a tree over `source` using the given backing
    pub fn with_backing(source: &[A::Input], backing: Backing) -> Result<Self, Error> {
        Ok(match backing {
            Backing::ArrayBased => Self::ArrayBased(ArrayBasedSegmentTree::new(source)?),
            Backing::NodeBased => Self::NodeBased(NodeBasedSegmentTree::new(source)?),
            Backing::NonRecursive => Self::NonRecursive(NonRecursiveSegmentTree::new(source)?),
        })
    }

    /// Returns the backing of this tree
    pub fn backing(&self) -> Backing {
        match self {
            Self::ArrayBased(_) => Backing::ArrayBased,
            Self::NodeBased(_) => Backing::NodeBased,
            Self::NonRecursive(_) => Backing::NonRecursive,
        }
    }
}

impl<A: Aggregator> RangeQuery<A> for AnySegmentTree<A> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            Self::ArrayBased(tree) => tree.len(),
            Self::NodeBased(tree) => tree.len(),
            Self::NonRecursive(tree) => tree.len(),
        }
    }

    #[inline]
    fn query_partial(&self, start: usize, end: usize) -> Result<A::PartialAggregate, Error> {
        match self {
            Self::ArrayBased(tree) => tree.query_partial(start, end),
            Self::NodeBased(tree) => tree.query_partial(start, end),
            Self::NonRecursive(tree) => tree.query_partial(start, end),
        }
    }
}

impl<A: Aggregator> RangeUpdate<A> for AnySegmentTree<A> {
    fn update_range<F>(&mut self, start: usize, end: usize, updater: F) -> Result<(), Error>
    where
        F: Fn(A::Input) -> A::Input,
    {
        match self {
            Self::ArrayBased(tree) => tree.update_range(start, end, updater),
            Self::NodeBased(tree) => tree.update_range(start, end, updater),
            Self::NonRecursive(_) => {
                log::debug!("rejecting update of [{start}, {end}] on a query-only tree");
                Err(Error::Unsupported {
                    backing: Backing::NonRecursive,
                })
            }
        }
    }
}
