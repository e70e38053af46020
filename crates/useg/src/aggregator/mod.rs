use core::fmt::Debug;

use crate::segment::Segment;

/// Incremental MAX aggregation
#[cfg(feature = "max")]
pub mod max;
/// Maximum contiguous subarray sum aggregation
#[cfg(feature = "max_subarray")]
pub mod max_subarray;
/// Incremental MIN aggregation
#[cfg(feature = "min")]
pub mod min;
/// Incremental PRODUCT aggregation
#[cfg(feature = "product")]
pub mod product;
/// Incremental SUM aggregation
#[cfg(feature = "sum")]
pub mod sum;

/// Aggregation interface that library users must implement to build a segment tree
///
/// µseg provides a bunch of pre-defined aggregator implementations including:
/// - [sum]
/// - [min]
/// - [max]
/// - [product]
/// - [max_subarray]
///
/// # Example
///
/// Here is a simple example showing how to create a SUM aggregator using u32.
/// ```
/// use useg::{Aggregator, ArrayBasedSegmentTree, RangeQuery};
///
/// #[derive(Default, Debug, Clone)]
/// struct MySumAggregator;
///
/// impl Aggregator for MySumAggregator {
///     type Input = u32;
///     type PartialAggregate = u32;
///     type Aggregate = u32;
///
///     fn lift(input: Self::Input) -> Self::PartialAggregate {
///         input
///     }
///
///     fn unlift(leaf: Self::PartialAggregate) -> Self::Input {
///         leaf
///     }
///
///     fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate {
///         a + b
///     }
///
///     fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
///         a
///     }
/// }
///
/// let tree = ArrayBasedSegmentTree::<MySumAggregator>::new(&[1, 2, 3]).unwrap();
/// assert_eq!(tree.query(1, 2), Ok(5));
/// ```
pub trait Aggregator: Default + Debug + Clone + 'static {
    /// Source value type stored in the sequence a tree is built over
    type Input: InputBounds;

    /// Partial aggregate type stored in every node of a tree
    ///
    /// For SUM, MIN and MAX this is a scalar. For the maximum subarray sum it is a
    /// (total, best prefix, best suffix, best) tuple.
    type PartialAggregate: PartialAggregateType;

    /// Final Aggregate type that can be lowered from a [Self::PartialAggregate].
    ///
    /// In many cases the [Self::PartialAggregate] type will be the same as [Self::Aggregate].
    type Aggregate: Debug + Send;

    /// Lifts a source value into the partial aggregate of a single-index segment
    fn lift(input: Self::Input) -> Self::PartialAggregate;

    /// Recovers the source value from the partial aggregate of a single-index segment
    ///
    /// Must satisfy `unlift(lift(v)) == v`. Leaves rely on it when an updater is applied.
    fn unlift(leaf: Self::PartialAggregate) -> Self::Input;

    /// Combines the partial aggregates of two adjacent segments.
    ///
    /// `a` always covers the lower indices. The operation must be associative but does not have
    /// to be commutative.
    fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate;

    /// Lowers a [Self::PartialAggregate] into a final [Self::Aggregate].
    fn lower(a: Self::PartialAggregate) -> Self::Aggregate;

    /// Combines a slice of partial aggregates from left to right
    ///
    /// Returns `None` if the slice is empty.
    #[inline]
    fn combine_slice(slice: &[Self::PartialAggregate]) -> Option<Self::PartialAggregate> {
        slice.iter().copied().reduce(Self::combine)
    }
}

/// Bounds for Aggregator Input
pub trait InputBounds: Debug + Clone + Copy + Send {}
impl<T> InputBounds for T where T: Debug + Clone + Copy + Send {}

/// Trait bounds for a partial aggregate type
#[cfg(not(feature = "serde"))]
pub trait PartialAggregateBounds: Default + Debug + Clone + Copy + Send {}

/// Trait bounds for a partial aggregate type
#[cfg(feature = "serde")]
pub trait PartialAggregateBounds:
    Default + Debug + Clone + Copy + Send + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

#[cfg(not(feature = "serde"))]
impl<T> PartialAggregateBounds for T where T: Default + Debug + Clone + Copy + Send {}

#[cfg(feature = "serde")]
impl<T> PartialAggregateBounds for T where
    T: Default + Debug + Clone + Copy + Send + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

/// A partial aggregate type
pub trait PartialAggregateType: PartialAggregateBounds {}

macro_rules! primitive_partial {
    ($type:ty) => {
        impl PartialAggregateType for $type {}
    };
}

primitive_partial!(u8);
primitive_partial!(u16);
primitive_partial!(u32);
primitive_partial!(u64);
primitive_partial!(i8);
primitive_partial!(i16);
primitive_partial!(i32);
primitive_partial!(i64);
primitive_partial!(f32);
primitive_partial!(f64);
primitive_partial!(i128);
primitive_partial!(u128);

/// The aggregate of one segment of the source sequence.
///
/// Query objects know their segment but not their children, that is the job of a tree.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug)]
pub struct QueryObject<A: Aggregator> {
    segment: Segment,
    partial: A::PartialAggregate,
}

impl<A: Aggregator> Clone for QueryObject<A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Aggregator> Copy for QueryObject<A> {}

impl<A: Aggregator> Default for QueryObject<A> {
    fn default() -> Self {
        Self {
            segment: Segment::default(),
            partial: A::PartialAggregate::default(),
        }
    }
}

impl<A: Aggregator> QueryObject<A> {
    /// Creates the leaf object for `index` holding `value`
    #[inline]
    pub fn initialize(index: usize, value: A::Input) -> Self {
        Self {
            segment: Segment::leaf(index),
            partial: A::lift(value),
        }
    }

    /// Creates an object from an already computed partial aggregate
    #[inline]
    pub fn from_partial(segment: Segment, partial: A::PartialAggregate) -> Self {
        Self { segment, partial }
    }

    /// Recomputes a leaf from `updater(current value)`
    #[inline]
    pub fn reinitialize<F>(&mut self, updater: &F)
    where
        F: Fn(A::Input) -> A::Input,
    {
        debug_assert!(self.segment.is_leaf());
        self.partial = A::lift(updater(A::unlift(self.partial)));
    }

    /// Combines with the object of the segment adjacent and to the right into a new object
    #[inline]
    pub fn combine(&self, right: &Self) -> Self {
        Self {
            segment: self.segment.merge(&right.segment),
            partial: A::combine(self.partial, right.partial),
        }
    }

    /// Recomputes a non-leaf object in place from its updated children
    #[inline]
    pub fn update(&mut self, left: &Self, right: &Self) {
        self.partial = A::combine(left.partial, right.partial);
    }

    /// Returns the segment this object aggregates
    #[inline]
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Returns the partial aggregate of the segment
    #[inline]
    pub fn partial(&self) -> A::PartialAggregate {
        self.partial
    }

    /// Returns the lowered aggregate of the segment
    #[inline]
    pub fn query_value(&self) -> A::Aggregate {
        A::lower(self.partial)
    }

    /// See [Segment::is_totally_overlapped_by]
    #[inline]
    pub fn is_totally_overlapped_by(&self, start: usize, end: usize) -> bool {
        self.segment.is_totally_overlapped_by(start, end)
    }

    /// See [Segment::is_left_half_overlapped_by]
    #[inline]
    pub fn is_left_half_overlapped_by(&self, start: usize, end: usize) -> bool {
        self.segment.is_left_half_overlapped_by(start, end)
    }

    /// See [Segment::is_right_half_overlapped_by]
    #[inline]
    pub fn is_right_half_overlapped_by(&self, start: usize, end: usize) -> bool {
        self.segment.is_right_half_overlapped_by(start, end)
    }
}

#[cfg(all(test, feature = "sum", feature = "max_subarray"))]
mod tests {
    use super::{max_subarray::I64MaxSubarraySumAggregator, sum::I64SumAggregator, *};

    #[test]
    fn query_object_combine_and_update() {
        let left = QueryObject::<I64SumAggregator>::initialize(0, 3);
        let right = QueryObject::<I64SumAggregator>::initialize(1, 4);
        let mut parent = left.combine(&right);
        assert_eq!(parent.segment(), Segment::new(0, 1));
        assert_eq!(parent.query_value(), 7);

        let mut right = right;
        right.reinitialize(&|x| x * 10);
        assert_eq!(right.query_value(), 40);
        parent.update(&left, &right);
        assert_eq!(parent.query_value(), 43);
        assert_eq!(parent.segment(), Segment::new(0, 1));
    }

    #[test]
    fn combine_slice_folds_left_to_right() {
        assert_eq!(I64SumAggregator::combine_slice(&[]), None);
        assert_eq!(I64SumAggregator::combine_slice(&[1, 2, 3]), Some(6));

        let partials: Vec<_> = [2, -1, 3, -2, 4]
            .into_iter()
            .map(I64MaxSubarraySumAggregator::lift)
            .collect();
        let combined = I64MaxSubarraySumAggregator::combine_slice(&partials).unwrap();
        assert_eq!(I64MaxSubarraySumAggregator::lower(combined), 6);
    }
}
