use super::super::Aggregator;

#[inline]
fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

macro_rules! max_impl {
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
                max(a, b)
            }

            #[inline]
            fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
                a
            }
        }
    };
}

max_impl!(U32MaxAggregator, u32);
max_impl!(U64MaxAggregator, u64);
max_impl!(I32MaxAggregator, i32);
max_impl!(I64MaxAggregator, i64);
max_impl!(F32MaxAggregator, f32);
max_impl!(F64MaxAggregator, f64);

#[cfg(test)]
mod tests {
    use crate::{NonRecursiveSegmentTree, RangeQuery};

    use super::*;

    #[test]
    fn max_test() {
        let tree = NonRecursiveSegmentTree::<U64MaxAggregator>::new(&[1, 9, 3, 7, 5, 2]).unwrap();
        assert_eq!(tree.query(0, 5), Ok(9));
        assert_eq!(tree.query(2, 5), Ok(7));
        assert_eq!(tree.query(4, 5), Ok(5));
        assert_eq!(tree.query(0, 0), Ok(1));
    }
}
