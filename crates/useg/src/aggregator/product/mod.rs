use super::super::Aggregator;

macro_rules! product_impl {
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
                a * b
            }

            #[inline]
            fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
                a
            }
        }
    };
}

product_impl!(U64ProductAggregator, u64);
product_impl!(I64ProductAggregator, i64);
product_impl!(F64ProductAggregator, f64);
