use super::super::Aggregator;

macro_rules! sum_impl {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Aggregator for $struct {
            type Input = $type;
            type PartialAggregate = $type;
            type Aggregate = $type;

            #[inline]
            fn lift(input: Self::Input) -> Self::PartialAggregate {
                input
            }

            #[inline]
            fn unlift(leaf: Self::PartialAggregate) -> Self::Input {
                leaf
            }

            #[inline]
            fn combine(
                a: Self::PartialAggregate,
                b: Self::PartialAggregate,
            ) -> Self::PartialAggregate {
                a + b
            }

            #[inline]
            fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
                a
            }
        }
    };
}

sum_impl!(U32SumAggregator, u32);
sum_impl!(U64SumAggregator, u64);
sum_impl!(I32SumAggregator, i32);
sum_impl!(I64SumAggregator, i64);
sum_impl!(F32SumAggregator, f32);
sum_impl!(F64SumAggregator, f64);

#[cfg(test)]
mod tests {
    use crate::{ArrayBasedSegmentTree, RangeQuery, RangeUpdate};

    use super::*;

    #[test]
    fn sum_test() {
        let mut tree = ArrayBasedSegmentTree::<I64SumAggregator>::new(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(tree.query(0, 4), Ok(15));
        assert_eq!(tree.query(1, 3), Ok(9));

        tree.update(2, |x| x + 10).unwrap();
        assert_eq!(tree.query(0, 4), Ok(25));
        assert_eq!(tree.query(2, 2), Ok(13));
        assert_eq!(tree.query(0, 1), Ok(3));
    }

    #[test]
    fn float_sum_test() {
        let tree = ArrayBasedSegmentTree::<F64SumAggregator>::new(&[0.5, 1.5, 2.0]).unwrap();
        assert_eq!(tree.query(0, 2), Ok(4.0));
        assert_eq!(tree.query(1, 2), Ok(3.5));
    }
}
