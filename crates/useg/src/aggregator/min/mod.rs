use super::super::Aggregator;

#[inline]
fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

macro_rules! min_impl {
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
                min(a, b)
            }

            #[inline]
            fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
                a
            }
        }
    };
}

min_impl!(U32MinAggregator, u32);
min_impl!(U64MinAggregator, u64);
min_impl!(I32MinAggregator, i32);
min_impl!(I64MinAggregator, i64);
min_impl!(F32MinAggregator, f32);
min_impl!(F64MinAggregator, f64);
