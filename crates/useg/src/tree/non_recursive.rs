#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use super::RangeQuery;
use crate::{Error, aggregator::Aggregator, check_range};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use useg_stats::profile_scope;

/// An iterative bottom-up segment tree that only supports queries
///
/// This tree allocates `2 * len` partial aggregates. Leaves live at `[len, 2 * len)` and the
/// internal node `i` in `[1, len)` holds `combine(buf[2i], buf[2i + 1])`. Neither building nor
/// querying recurses.
///
/// The tree is inspired by [this blog post](https://codeforces.com/blog/entry/18051), adjusted
/// for closed intervals and to work without an identity element.
///
/// # Example
///
/// ```
/// use useg::{aggregator::sum::U64SumAggregator, NonRecursiveSegmentTree, RangeQuery};
///
/// let tree = NonRecursiveSegmentTree::<U64SumAggregator>::new(&[3, 1, 4, 1, 5]).unwrap();
/// assert_eq!(tree.query(1, 3), Ok(6));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Debug, Clone)]
pub struct NonRecursiveSegmentTree<A: Aggregator> {
    buf: Vec<A::PartialAggregate>,
    n: usize,
    #[cfg(feature = "profiler")]
    #[cfg_attr(feature = "serde", serde(skip))]
    stats: Stats,
}

impl<A: Aggregator> NonRecursiveSegmentTree<A> {
    /// Builds a tree over `source` in `O(len)` time
    pub fn new(source: &[A::Input]) -> Result<Self, Error> {
        if source.is_empty() {
            return Err(Error::Empty);
        }
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let n = source.len();
        let mut buf = Vec::with_capacity(2 * n);
        buf.resize(n, A::PartialAggregate::default());
        buf.extend(source.iter().copied().map(A::lift));
        for i in (1..n).rev() {
            buf[i] = A::combine(buf[i << 1], buf[i << 1 | 1]);
        }
        log::trace!("built non-recursive segment tree over {n} elements");

        Ok(Self {
            buf,
            n,
            #[cfg(feature = "profiler")]
            stats,
        })
    }

    /// View the leaf partial aggregates using a slice.
    #[inline]
    pub fn view(&self) -> &[A::PartialAggregate] {
        &self.buf[self.n..]
    }

    /// Returns the profiling stats of this tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl<A: Aggregator> RangeQuery<A> for NonRecursiveSegmentTree<A> {
    #[inline]
    fn len(&self) -> usize {
        self.n
    }

    fn query_partial(&self, start: usize, end: usize) -> Result<A::PartialAggregate, Error> {
        check_range(start, end, self.n)?;
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        if start == end {
            return Ok(self.buf[start + self.n]);
        }

        let mut resl: Option<A::PartialAggregate> = None;
        let mut resr: Option<A::PartialAggregate> = None;
        let mut l = start + self.n;
        let mut r = end + self.n + 1;
        while l < r {
            if l & 1 == 1 {
                resl = Some(match resl {
                    None => self.buf[l],
                    Some(acc) => A::combine(acc, self.buf[l]),
                });
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                resr = Some(match resr {
                    None => self.buf[r],
                    Some(acc) => A::combine(self.buf[r], acc),
                });
            }
            l >>= 1;
            r >>= 1;
        }

        match (resl, resr) {
            (Some(l), Some(r)) => Ok(A::combine(l, r)),
            (Some(res), None) | (None, Some(res)) => Ok(res),
            // a valid non-empty range always folds at least one node
            (None, None) => Err(Error::InvalidRange {
                start,
                end,
                len: self.n,
            }),
        }
    }
}
