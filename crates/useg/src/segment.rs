/// A contiguous inclusive index range `[start, end]` represented by one tree node
///
/// The overlap predicates on this type decide which children a descent visits. They assume the
/// given range overlaps the segment at least partially, which holds for every node a descent
/// reaches since the root covers the whole source sequence.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    start: usize,
    end: usize,
}

impl Segment {
    /// Creates a segment covering `[start, end]`
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }
    /// Creates a single-index segment
    #[inline]
    pub const fn leaf(index: usize) -> Self {
        Self::new(index, index)
    }
    /// First index covered by the segment
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }
    /// Last index covered by the segment
    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }
    /// Number of indices covered by the segment
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
    /// Returns `true` if the segment covers a single index
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.start == self.end
    }
    /// Last index of the left half
    #[inline]
    pub const fn mid(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }
    /// Splits the segment into its left `[start, mid]` and right `[mid + 1, end]` halves
    #[inline]
    pub const fn split(&self) -> (Segment, Segment) {
        let mid = self.mid();
        (Segment::new(self.start, mid), Segment::new(mid + 1, self.end))
    }
    /// Merges with the segment adjacent and to the right
    #[inline]
    pub const fn merge(&self, right: &Segment) -> Segment {
        Segment::new(self.start, right.end)
    }
    /// The given range starts at or before the segment starts and ends at or after it ends
    #[inline]
    pub const fn is_totally_overlapped_by(&self, start: usize, end: usize) -> bool {
        start <= self.start && end >= self.end
    }
    /// Some overlap is assumed to exist, this checks whether it reaches into the left half
    #[inline]
    pub const fn is_left_half_overlapped_by(&self, start: usize, _end: usize) -> bool {
        start <= self.mid()
    }
    /// Some overlap is assumed to exist, this checks whether it reaches into the right half
    #[inline]
    pub const fn is_right_half_overlapped_by(&self, _start: usize, end: usize) -> bool {
        end > self.mid()
    }
}

/// Returns the array indices of the children of node `index` in a complete binary tree
#[inline]
pub(crate) const fn children(index: usize) -> (usize, usize) {
    let left = 2 * index + 1;
    (left, left + 1)
}

/// Number of slots needed to store a complete binary tree over `len` leaves
#[inline]
pub(crate) const fn complete_tree_slots(len: usize) -> usize {
    2 * len.next_power_of_two() - 1
}
