#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use super::{RangeQuery, RangeUpdate};
use crate::{
    Error,
    aggregator::{Aggregator, QueryObject},
    check_range,
    segment::{Segment, children, complete_tree_slots},
};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use useg_stats::profile_scope;

/// A segment tree stored as a complete binary tree in one flat array
///
/// The tree allocates `2P - 1` query objects where `P` is the smallest power of two `>= len`.
/// The children of the node at index `i` live at `2i + 1` and `2i + 2`. Slots that do not
/// correspond to any segment when `len` is not a power of two are left at their default value.
///
/// # Example
///
/// ```
/// use useg::{aggregator::min::I32MinAggregator, ArrayBasedSegmentTree, RangeQuery, RangeUpdate};
///
/// let mut tree = ArrayBasedSegmentTree::<I32MinAggregator>::new(&[4, 2, 7, 1, 9]).unwrap();
/// assert_eq!(tree.query(0, 2), Ok(2));
///
/// tree.update_range(0, 3, |x| x * 2).unwrap();
/// assert_eq!(tree.query(0, 2), Ok(4));
/// assert_eq!(tree.query(3, 4), Ok(2));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug, Clone)]
pub struct ArrayBasedSegmentTree<A: Aggregator> {
    slots: Vec<QueryObject<A>>,
    len: usize,
    #[cfg(feature = "profiler")]
    #[cfg_attr(feature = "serde", serde(skip))]
    stats: Stats,
}

impl<A: Aggregator> ArrayBasedSegmentTree<A> {
    /// Builds a tree over `source` in `O(len)` time
    pub fn new(source: &[A::Input]) -> Result<Self, Error> {
        if source.is_empty() {
            return Err(Error::Empty);
        }
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let len = source.len();
        let mut slots = vec![QueryObject::default(); complete_tree_slots(len)];
        Self::build(&mut slots, source, 0, Segment::new(0, len - 1));
        log::trace!(
            "built array-based segment tree with {} slots over {} elements",
            slots.len(),
            len
        );

        Ok(Self {
            slots,
            len,
            #[cfg(feature = "profiler")]
            stats,
        })
    }

    fn build(slots: &mut [QueryObject<A>], source: &[A::Input], index: usize, segment: Segment) {
        if segment.is_leaf() {
            slots[index] = QueryObject::initialize(segment.start(), source[segment.start()]);
            return;
        }
        let (left, right) = children(index);
        let (left_segment, right_segment) = segment.split();
        Self::build(slots, source, left, left_segment);
        Self::build(slots, source, right, right_segment);
        slots[index] = slots[left].combine(&slots[right]);
    }

    // Every node reached overlaps the query at least partially.
    fn query_node(&self, index: usize, start: usize, end: usize) -> QueryObject<A> {
        let object = &self.slots[index];
        if object.is_totally_overlapped_by(start, end) {
            return *object;
        }

        let (left, right) = children(index);
        match (
            object.is_left_half_overlapped_by(start, end),
            object.is_right_half_overlapped_by(start, end),
        ) {
            (true, true) => self
                .query_node(left, start, end)
                .combine(&self.query_node(right, start, end)),
            (true, false) => self.query_node(left, start, end),
            _ => self.query_node(right, start, end),
        }
    }

    fn update_node<F>(&mut self, index: usize, start: usize, end: usize, updater: &F)
    where
        F: Fn(A::Input) -> A::Input,
    {
        let object = self.slots[index];
        if object.segment().is_leaf() {
            self.slots[index].reinitialize(updater);
            return;
        }

        let (left, right) = children(index);
        if object.is_left_half_overlapped_by(start, end) {
            self.update_node(left, start, end, updater);
        }
        if object.is_right_half_overlapped_by(start, end) {
            self.update_node(right, start, end, updater);
        }

        let (left, right) = (self.slots[left], self.slots[right]);
        self.slots[index].update(&left, &right);
    }

    /// Returns the query object of the root, which covers the whole sequence
    #[inline]
    pub fn root(&self) -> &QueryObject<A> {
        &self.slots[0]
    }

    /// Returns the profiling stats of this tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl<A: Aggregator> RangeQuery<A> for ArrayBasedSegmentTree<A> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn query_partial(&self, start: usize, end: usize) -> Result<A::PartialAggregate, Error> {
        check_range(start, end, self.len)?;
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        Ok(self.query_node(0, start, end).partial())
    }
}

impl<A: Aggregator> RangeUpdate<A> for ArrayBasedSegmentTree<A> {
    fn update_range<F>(&mut self, start: usize, end: usize, updater: F) -> Result<(), Error>
    where
        F: Fn(A::Input) -> A::Input,
    {
        check_range(start, end, self.len)?;
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        self.update_node(0, start, end, &updater);
        Ok(())
    }
}

#[cfg(all(test, feature = "sum", feature = "max"))]
mod tests {
    use super::*;
    use crate::{
        aggregator::{max::I64MaxAggregator, sum::I64SumAggregator},
        naive,
    };

    #[test]
    fn single_element() {
        let mut tree = ArrayBasedSegmentTree::<I64SumAggregator>::new(&[42]).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.query(0, 0), Ok(42));
        tree.update(0, |x| x - 2).unwrap();
        assert_eq!(tree.query(0, 0), Ok(40));
        assert_eq!(tree.root().segment(), Segment::new(0, 0));
    }

    #[test]
    fn empty_source() {
        let err = ArrayBasedSegmentTree::<I64SumAggregator>::new(&[]).unwrap_err();
        assert!(err.is_empty_source());
    }

    #[test]
    fn invalid_ranges() {
        let mut tree = ArrayBasedSegmentTree::<I64SumAggregator>::new(&[1, 2, 3]).unwrap();
        assert_eq!(
            tree.query(2, 1),
            Err(Error::InvalidRange {
                start: 2,
                end: 1,
                len: 3
            })
        );
        assert!(tree.query(0, 3).unwrap_err().is_invalid_range());
        assert!(tree.update(3, |x| x).unwrap_err().is_invalid_range());
        // nothing was touched by the rejected update
        assert_eq!(tree.query(0, 2), Ok(6));
    }

    #[test]
    fn matches_naive_queries() {
        for len in 1..40 {
            let values: Vec<i64> = (0..len).map(|_| fastrand::i64(-100..100)).collect();
            let sum = ArrayBasedSegmentTree::<I64SumAggregator>::new(&values).unwrap();
            let max = ArrayBasedSegmentTree::<I64MaxAggregator>::new(&values).unwrap();
            for start in 0..len {
                for end in start..len {
                    assert_eq!(
                        sum.query(start, end),
                        naive::query::<I64SumAggregator>(&values, start, end)
                    );
                    assert_eq!(
                        max.query(start, end),
                        naive::query::<I64MaxAggregator>(&values, start, end)
                    );
                }
            }
        }
    }

    #[test]
    fn update_locality() {
        let mut values: Vec<i64> = (0..33).map(|_| fastrand::i64(-100..100)).collect();
        let mut tree = ArrayBasedSegmentTree::<I64SumAggregator>::new(&values).unwrap();
        for _ in 0..100 {
            let start = fastrand::usize(0..values.len());
            let end = fastrand::usize(start..values.len());
            let add = fastrand::i64(-10..10);
            let before_left = (start > 0).then(|| tree.query(0, start - 1).unwrap());
            let before_right = (end + 1 < values.len())
                .then(|| tree.query(end + 1, values.len() - 1).unwrap());

            tree.update_range(start, end, |x| x + add).unwrap();
            naive::update_range(&mut values, start, end, |x| x + add).unwrap();

            assert_eq!(
                tree.query(start, end),
                naive::query::<I64SumAggregator>(&values, start, end)
            );
            assert_eq!(
                before_left,
                (start > 0).then(|| tree.query(0, start - 1).unwrap())
            );
            assert_eq!(
                before_right,
                (end + 1 < values.len()).then(|| tree.query(end + 1, values.len() - 1).unwrap())
            );
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let tree = ArrayBasedSegmentTree::<I64SumAggregator>::new(&[1, 2, 3, 4, 5]).unwrap();
        let bytes = postcard::to_allocvec(&tree).unwrap();
        let restored: ArrayBasedSegmentTree<I64SumAggregator> =
            postcard::from_bytes(&bytes).unwrap();
        assert_eq!(restored.query(1, 3), Ok(9));
        assert_eq!(restored.len(), 5);
    }
}
