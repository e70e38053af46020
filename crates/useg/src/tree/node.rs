#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use super::{RangeQuery, RangeUpdate};
use crate::{
    Error,
    aggregator::{Aggregator, QueryObject},
    check_range,
    segment::Segment,
};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use useg_stats::profile_scope;

// A node either covers a single index or owns both of its children.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug, Clone)]
struct Node<A: Aggregator> {
    object: QueryObject<A>,
    children: Option<Box<(Node<A>, Node<A>)>>,
}

impl<A: Aggregator> Node<A> {
    fn build(source: &[A::Input], segment: Segment) -> Self {
        if segment.is_leaf() {
            return Self {
                object: QueryObject::initialize(segment.start(), source[segment.start()]),
                children: None,
            };
        }
        let (left_segment, right_segment) = segment.split();
        let left = Self::build(source, left_segment);
        let right = Self::build(source, right_segment);
        Self {
            object: left.object.combine(&right.object),
            children: Some(Box::new((left, right))),
        }
    }

    fn query(&self, start: usize, end: usize) -> QueryObject<A> {
        if self.object.is_totally_overlapped_by(start, end) {
            return self.object;
        }
        // a node that is not totally overlapped is never a leaf
        let Some((left, right)) = self.children.as_deref() else {
            return self.object;
        };
        match (
            self.object.is_left_half_overlapped_by(start, end),
            self.object.is_right_half_overlapped_by(start, end),
        ) {
            (true, true) => left.query(start, end).combine(&right.query(start, end)),
            (true, false) => left.query(start, end),
            _ => right.query(start, end),
        }
    }

    fn update<F>(&mut self, start: usize, end: usize, updater: &F)
    where
        F: Fn(A::Input) -> A::Input,
    {
        match self.children.as_deref_mut() {
            None => self.object.reinitialize(updater),
            Some((left, right)) => {
                if self.object.is_left_half_overlapped_by(start, end) {
                    left.update(start, end, updater);
                }
                if self.object.is_right_half_overlapped_by(start, end) {
                    right.update(start, end, updater);
                }
                self.object.update(&left.object, &right.object);
            }
        }
    }

    fn count(&self) -> usize {
        match self.children.as_deref() {
            None => 1,
            Some((left, right)) => 1 + left.count() + right.count(),
        }
    }
}

/// A segment tree where every node owns its children
///
/// Runs the same recursive algorithm as [ArrayBasedSegmentTree](super::array::ArrayBasedSegmentTree)
/// but allocates exactly `2 * len - 1` nodes, avoiding the unused slots of the array layout when
/// `len` is not a power of two.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug, Clone)]
pub struct NodeBasedSegmentTree<A: Aggregator> {
    root: Node<A>,
    len: usize,
    #[cfg(feature = "profiler")]
    #[cfg_attr(feature = "serde", serde(skip))]
    stats: Stats,
}

impl<A: Aggregator> NodeBasedSegmentTree<A> {
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
        let root = Node::build(source, Segment::new(0, len - 1));
        log::trace!("built node-based segment tree over {len} elements");

        Ok(Self {
            root,
            len,
            #[cfg(feature = "profiler")]
            stats,
        })
    }

    /// Returns the query object of the root, which covers the whole sequence
    #[inline]
    pub fn root(&self) -> &QueryObject<A> {
        &self.root.object
    }

    /// Returns the number of allocated nodes
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Returns the profiling stats of this tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl<A: Aggregator> RangeQuery<A> for NodeBasedSegmentTree<A> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn query_partial(&self, start: usize, end: usize) -> Result<A::PartialAggregate, Error> {
        check_range(start, end, self.len)?;
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        Ok(self.root.query(start, end).partial())
    }
}

impl<A: Aggregator> RangeUpdate<A> for NodeBasedSegmentTree<A> {
    fn update_range<F>(&mut self, start: usize, end: usize, updater: F) -> Result<(), Error>
    where
        F: Fn(A::Input) -> A::Input,
    {
        check_range(start, end, self.len)?;
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        self.root.update(start, end, &updater);
        Ok(())
    }
}
