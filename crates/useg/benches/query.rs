use criterion::{Bencher, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use useg::{
    AnySegmentTree,
    Backing,
    RangeQuery,
    aggregator::{max_subarray::I64MaxSubarraySumAggregator, sum::I64SumAggregator, Aggregator},
    naive,
};

const SIZES: [usize; 4] = [1 << 8, 1 << 12, 1 << 16, 1 << 20];

pub fn query_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for len in SIZES.iter() {
        for backing in Backing::ALL {
            group.bench_with_input(
                BenchmarkId::new(format!("sum-{backing}"), len),
                len,
                |b, &len| {
                    query::<I64SumAggregator>(len, backing, b);
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("max-subarray-{backing}"), len),
                len,
                |b, &len| {
                    query::<I64MaxSubarraySumAggregator>(len, backing, b);
                },
            );
        }
        // the linear scan is hopeless beyond this point
        if *len <= 1 << 16 {
            group.bench_with_input(BenchmarkId::new("sum-naive", len), len, |b, &len| {
                naive_query(len, b);
            });
        }
    }
    group.finish();
}

fn random_ranges(len: usize, count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .map(|_| {
            let start = fastrand::usize(0..len);
            (start, fastrand::usize(start..len))
        })
        .collect()
}

fn query<A: Aggregator<Input = i64>>(len: usize, backing: Backing, bencher: &mut Bencher) {
    let values: Vec<i64> = (0..len).map(|_| fastrand::i64(-1000..1000)).collect();
    let tree = AnySegmentTree::<A>::with_backing(&values, backing).unwrap();
    let ranges = random_ranges(len, 1024);
    let mut next = 0;
    bencher.iter(|| {
        let (start, end) = ranges[next % ranges.len()];
        next += 1;
        black_box(tree.query(start, end))
    });
}

fn naive_query(len: usize, bencher: &mut Bencher) {
    let values: Vec<i64> = (0..len).map(|_| fastrand::i64(-1000..1000)).collect();
    let ranges = random_ranges(len, 1024);
    let mut next = 0;
    bencher.iter(|| {
        let (start, end) = ranges[next % ranges.len()];
        next += 1;
        black_box(naive::query::<I64SumAggregator>(&values, start, end))
    });
}

criterion_group!(benches, query_benchmark);
criterion_main!(benches);
