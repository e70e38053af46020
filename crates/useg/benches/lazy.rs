use criterion::{Bencher, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use useg::{
    ArrayBasedSegmentTree,
    LazySumSegmentTree,
    RangeUpdate,
    aggregator::sum::I64SumAggregator,
    naive,
};

pub fn lazy_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("range-add");
    let len = 1 << 16;
    for width in [1, 64, 4096, len].iter() {
        group.bench_with_input(BenchmarkId::new("lazy", width), width, |b, &width| {
            lazy_add(len, width, b);
        });
        group.bench_with_input(BenchmarkId::new("array-based", width), width, |b, &width| {
            array_add(len, width, b);
        });
        group.bench_with_input(BenchmarkId::new("naive", width), width, |b, &width| {
            let mut values = vec![0i64; len];
            b.iter(|| {
                let start = fastrand::usize(0..=len - width);
                naive::add_range(&mut values, start, start + width - 1, 1).unwrap();
            });
        });
    }
    group.finish();

    c.bench_function("lazy-query-after-adds", |b| {
        let mut tree = LazySumSegmentTree::new(&vec![0; len]).unwrap();
        for _ in 0..1024 {
            let start = fastrand::usize(0..len);
            let end = fastrand::usize(start..len);
            tree.update_range(start, end, fastrand::i64(-100..100)).unwrap();
        }
        b.iter(|| {
            let start = fastrand::usize(0..len);
            let end = fastrand::usize(start..len);
            black_box(tree.query(start, end))
        });
    });
}

fn lazy_add(len: usize, width: usize, bencher: &mut Bencher) {
    let mut tree = LazySumSegmentTree::new(&vec![0; len]).unwrap();
    bencher.iter(|| {
        let start = fastrand::usize(0..=len - width);
        tree.update_range(start, start + width - 1, 1).unwrap();
    });
}

fn array_add(len: usize, width: usize, bencher: &mut Bencher) {
    let mut tree = ArrayBasedSegmentTree::<I64SumAggregator>::new(&vec![0; len]).unwrap();
    bencher.iter(|| {
        let start = fastrand::usize(0..=len - width);
        tree.update_range(start, start + width - 1, |x| x + 1).unwrap();
    });
}

criterion_group!(benches, lazy_benchmark);
criterion_main!(benches);
