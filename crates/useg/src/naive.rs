//! Every function scans the requested range directly and runs in `O(hi - lo + 1)` time.
//!
//! Ranges are validated exactly like the trees validate them, so a tree and its reference
//! can be compared call by call, errors included.

use core::ops::Add;

use crate::{Error, aggregator::Aggregator, check_range};

/// Folds the lifted values of `[start, end]` from left to right using [Aggregator::combine]
pub fn query_partial<A: Aggregator>(
    source: &[A::Input],
    start: usize,
    end: usize,
) -> Result<A::PartialAggregate, Error> {
    check_range(start, end, source.len())?;
    let mut values = source[start..=end].iter().copied().map(A::lift);
    // a validated range is never empty
    let first = values.next().ok_or(Error::InvalidRange {
        start,
        end,
        len: source.len(),
    })?;
    Ok(values.fold(first, A::combine))
}

/// Returns the lowered aggregate of `[start, end]`
///
/// ```
/// use useg::{aggregator::max::U32MaxAggregator, naive};
///
/// assert_eq!(naive::query::<U32MaxAggregator>(&[1, 9, 4], 0, 2), Ok(9));
/// assert!(naive::query::<U32MaxAggregator>(&[1, 9, 4], 1, 3).is_err());
/// ```
#[inline]
pub fn query<A: Aggregator>(
    source: &[A::Input],
    start: usize,
    end: usize,
) -> Result<A::Aggregate, Error> {
    query_partial::<A>(source, start, end).map(A::lower)
}

/// Returns the largest sum of a non-empty contiguous run inside `[start, end]`
///
/// Uses Kadane's scan: the best run ending at index `i` either extends the best run ending at
/// `i - 1` or starts fresh at `i`.
pub fn max_subarray_sum<T>(source: &[T], start: usize, end: usize) -> Result<T, Error>
where
    T: Copy + PartialOrd + Add<Output = T>,
{
    check_range(start, end, source.len())?;
    let mut ending_here = source[start];
    let mut best = ending_here;
    for &value in &source[start + 1..=end] {
        let extended = ending_here + value;
        ending_here = if extended > value { extended } else { value };
        if ending_here > best {
            best = ending_here;
        }
    }
    Ok(best)
}

/// Replaces the value at `index` with `updater(value)`
#[inline]
pub fn update<T, F>(source: &mut [T], index: usize, updater: F) -> Result<(), Error>
where
    T: Copy,
    F: Fn(T) -> T,
{
    update_range(source, index, index, updater)
}

/// Replaces every value in `[start, end]` with `updater(value)`
pub fn update_range<T, F>(source: &mut [T], start: usize, end: usize, updater: F) -> Result<(), Error>
where
    T: Copy,
    F: Fn(T) -> T,
{
    check_range(start, end, source.len())?;
    for value in &mut source[start..=end] {
        *value = updater(*value);
    }
    Ok(())
}

/// Adds `delta` to every value in `[start, end]`
#[inline]
pub fn add_range(source: &mut [i64], start: usize, end: usize, delta: i64) -> Result<(), Error> {
    update_range(source, start, end, |value| value + delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kadane() {
        let values = [2, -1, 3, -2, 4];
        assert_eq!(max_subarray_sum(&values, 0, 4), Ok(6));
        assert_eq!(max_subarray_sum(&values, 1, 1), Ok(-1));
        assert_eq!(max_subarray_sum(&values, 1, 3), Ok(3));
        assert_eq!(max_subarray_sum(&[-3, -1, -2], 0, 2), Ok(-1));
        assert_eq!(max_subarray_sum(&[1.5, -0.5, 2.0], 0, 2), Ok(3.0));
        assert!(max_subarray_sum(&values, 3, 5).unwrap_err().is_invalid_range());
    }

    #[test]
    fn updates() {
        let mut values = [1, 2, 3, 4];
        update(&mut values, 0, |x| x * 10).unwrap();
        assert_eq!(values, [10, 2, 3, 4]);
        update_range(&mut values, 1, 2, |_| 0).unwrap();
        assert_eq!(values, [10, 0, 0, 4]);
        add_range(&mut values, 0, 3, -1).unwrap();
        assert_eq!(values, [9, -1, -1, 3]);

        assert!(add_range(&mut values, 2, 1, 5).unwrap_err().is_invalid_range());
        assert!(update(&mut values, 4, |x| x).unwrap_err().is_invalid_range());
        assert_eq!(values, [9, -1, -1, 3]);
    }

    #[cfg(feature = "sum")]
    #[test]
    fn query_folds_left_to_right() {
        use crate::aggregator::sum::I64SumAggregator;

        let values = [5, -2, 7];
        assert_eq!(query::<I64SumAggregator>(&values, 0, 2), Ok(10));
        assert_eq!(query_partial::<I64SumAggregator>(&values, 1, 1), Ok(-2));
        assert_eq!(
            query::<I64SumAggregator>(&values, 0, 3),
            Err(Error::InvalidRange {
                start: 0,
                end: 3,
                len: 3
            })
        );
        assert!(query::<I64SumAggregator>(&[], 0, 0).is_err());
    }
}
