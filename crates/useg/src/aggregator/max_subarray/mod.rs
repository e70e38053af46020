use core::ops::Add;

use crate::aggregator::{Aggregator, PartialAggregateType};

#[inline]
fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

/// Maximum subarray sum aggregate state
///
/// Given a segment, `best` is the maximum sum of any non-empty contiguous subrange of it.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MaxSubarrayState<T: PartialOrd + Copy> {
    total: T,
    best_prefix: T,
    best_suffix: T,
    best: T,
}

impl<T: PartialOrd + Copy + Add<Output = T>> MaxSubarrayState<T> {
    #[inline]
    fn leaf(value: T) -> Self {
        Self {
            total: value,
            best_prefix: value,
            best_suffix: value,
            best: value,
        }
    }
    #[inline]
    fn merge(left: Self, right: Self) -> Self {
        Self {
            total: left.total + right.total,
            // starts at the left and may or may not cross into the right
            best_prefix: max(left.best_prefix, left.total + right.best_prefix),
            // starts at the right and may or may not cross into the left
            best_suffix: max(right.best_suffix, right.total + left.best_suffix),
            // either crosses the boundary or lies entirely in one side
            best: max(
                max(left.best, right.best),
                left.best_suffix + right.best_prefix,
            ),
        }
    }
    /// Returns the sum of the whole segment
    pub fn total(&self) -> T {
        self.total
    }
    /// Returns the maximum sum of a subrange starting at the first index of the segment
    pub fn best_prefix(&self) -> T {
        self.best_prefix
    }
    /// Returns the maximum sum of a subrange ending at the last index of the segment
    pub fn best_suffix(&self) -> T {
        self.best_suffix
    }
    /// Returns the maximum sum of any subrange of the segment
    pub fn best(&self) -> T {
        self.best
    }
}

macro_rules! max_subarray_partial_impl {
    ($type:ty) => {
        impl PartialAggregateType for MaxSubarrayState<$type> {}
    };
}

max_subarray_partial_impl!(i32);
max_subarray_partial_impl!(i64);
max_subarray_partial_impl!(f64);

macro_rules! max_subarray_impl {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Aggregator for $struct {
            type Input = $type;
            type PartialAggregate = MaxSubarrayState<$type>;
            type Aggregate = $type;

            #[inline]
            fn lift(input: Self::Input) -> Self::PartialAggregate {
                MaxSubarrayState::leaf(input)
            }

            #[inline]
            fn unlift(leaf: Self::PartialAggregate) -> Self::Input {
                leaf.total
            }

            #[inline]
            fn combine(
                a: Self::PartialAggregate,
                b: Self::PartialAggregate,
            ) -> Self::PartialAggregate {
                MaxSubarrayState::merge(a, b)
            }

            #[inline]
            fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
                a.best
            }
        }
    };
}

max_subarray_impl!(I32MaxSubarraySumAggregator, i32);
max_subarray_impl!(I64MaxSubarraySumAggregator, i64);
max_subarray_impl!(F64MaxSubarraySumAggregator, f64);
