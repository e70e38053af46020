#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::{
    Error,
    check_range,
    segment::{Segment, children, complete_tree_slots},
};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use useg_stats::profile_scope;

/// A node of a [LazySumSegmentTree]
///
/// `delta` is a pending addition to every index of the segment that has not been folded into
/// `raw_sum`. The sum of the segment is always `raw_sum + delta * len`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LazyNode {
    segment: Segment,
    raw_sum: i64,
    delta: i64,
}

impl LazyNode {
    #[inline]
    fn leaf(index: usize, value: i64) -> Self {
        Self {
            segment: Segment::leaf(index),
            raw_sum: value,
            delta: 0,
        }
    }
    /// Returns the segment covered by this node
    #[inline]
    pub fn segment(&self) -> Segment {
        self.segment
    }
    /// Returns the committed sum, excluding the pending delta
    #[inline]
    pub fn raw_sum(&self) -> i64 {
        self.raw_sum
    }
    /// Returns the pending per-index addition
    #[inline]
    pub fn delta(&self) -> i64 {
        self.delta
    }
    /// Returns the sum of the segment including the pending delta
    #[inline]
    pub fn sum(&self) -> i64 {
        self.raw_sum + self.delta * self.segment.len() as i64
    }
}

/// A SUM segment tree supporting range additions in `O(log n)`
///
/// A range addition that totally covers a node is recorded as that node's `delta` and is never
/// pushed down eagerly. Deltas of ancestors compose additively: a query adds the delta of every
/// partially covered node on its path, scaled by the length of the part that was covered.
/// A node's `raw_sum` is only recomputed from its children when an update splits it.
///
/// # Example
///
/// ```
/// use useg::LazySumSegmentTree;
///
/// let mut tree = LazySumSegmentTree::new(&[0; 5]).unwrap();
/// tree.update_range(0, 4, 1).unwrap();
/// assert_eq!(tree.query(0, 4), Ok(5));
///
/// tree.update_range(1, 3, 2).unwrap();
/// assert_eq!(tree.query(0, 4), Ok(11));
/// assert_eq!(tree.query(0, 0), Ok(1));
/// assert_eq!(tree.query(1, 1), Ok(3));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, Clone)]
pub struct LazySumSegmentTree {
    nodes: Vec<LazyNode>,
    len: usize,
    #[cfg(feature = "profiler")]
    #[cfg_attr(feature = "serde", serde(skip))]
    stats: Stats,
}

impl LazySumSegmentTree {
    /// Builds a tree over `source` in `O(len)` time
    pub fn new(source: &[i64]) -> Result<Self, Error> {
        if source.is_empty() {
            return Err(Error::Empty);
        }
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let len = source.len();
        let mut nodes = vec![LazyNode::default(); complete_tree_slots(len)];
        Self::build(&mut nodes, source, 0, Segment::new(0, len - 1));
        log::trace!(
            "built lazy sum segment tree with {} slots over {} elements",
            nodes.len(),
            len
        );

        Ok(Self {
            nodes,
            len,
            #[cfg(feature = "profiler")]
            stats,
        })
    }

    fn build(nodes: &mut [LazyNode], source: &[i64], index: usize, segment: Segment) {
        if segment.is_leaf() {
            nodes[index] = LazyNode::leaf(segment.start(), source[segment.start()]);
            return;
        }
        let (left, right) = children(index);
        let (left_segment, right_segment) = segment.split();
        Self::build(nodes, source, left, left_segment);
        Self::build(nodes, source, right, right_segment);
        nodes[index] = LazyNode {
            segment,
            raw_sum: nodes[left].sum() + nodes[right].sum(),
            delta: 0,
        };
    }

    /// Returns the number of elements in the source sequence
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the sum of `[start, end]`
    pub fn query(&self, start: usize, end: usize) -> Result<i64, Error> {
        check_range(start, end, self.len)?;
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        Ok(self.query_node(0, start, end).1)
    }

    /// Returns the value at `index`
    #[inline]
    pub fn query_point(&self, index: usize) -> Result<i64, Error> {
        self.query(index, index)
    }

    // Returns the covered part of the node's segment together with its sum.
    fn query_node(&self, index: usize, start: usize, end: usize) -> (Segment, i64) {
        let node = &self.nodes[index];
        if node.segment.is_totally_overlapped_by(start, end) {
            return (node.segment, node.sum());
        }

        let (left, right) = children(index);
        let (covered, sum) = match (
            node.segment.is_left_half_overlapped_by(start, end),
            node.segment.is_right_half_overlapped_by(start, end),
        ) {
            (true, true) => {
                let (left_covered, left_sum) = self.query_node(left, start, end);
                let (right_covered, right_sum) = self.query_node(right, start, end);
                (left_covered.merge(&right_covered), left_sum + right_sum)
            }
            (true, false) => self.query_node(left, start, end),
            _ => self.query_node(right, start, end),
        };
        // the children know nothing about this node's pending delta
        (covered, sum + node.delta * covered.len() as i64)
    }

    /// Adds `delta` to every value in `[start, end]`
    pub fn update_range(&mut self, start: usize, end: usize, delta: i64) -> Result<(), Error> {
        check_range(start, end, self.len)?;
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        self.update_node(0, start, end, delta);
        Ok(())
    }

    /// Adds `delta` to the value at `index`
    #[inline]
    pub fn update(&mut self, index: usize, delta: i64) -> Result<(), Error> {
        self.update_range(index, index, delta)
    }

    fn update_node(&mut self, index: usize, start: usize, end: usize, delta: i64) {
        let node = self.nodes[index];
        if node.segment.is_totally_overlapped_by(start, end) {
            self.nodes[index].delta += delta;
            return;
        }

        let (left, right) = children(index);
        if node.segment.is_left_half_overlapped_by(start, end) {
            self.update_node(left, start, end, delta);
        }
        if node.segment.is_right_half_overlapped_by(start, end) {
            self.update_node(right, start, end, delta);
        }
        // collect the children's deltas, this node's own delta still applies on top
        self.nodes[index].raw_sum = self.nodes[left].sum() + self.nodes[right].sum();
    }

    /// Returns the root node, which covers the whole sequence
    #[inline]
    pub fn root(&self) -> &LazyNode {
        &self.nodes[0]
    }

    /// Returns the profiling stats of this tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
