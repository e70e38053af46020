#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use useg::{aggregator::sum::I64SumAggregator, *};

#[derive(Debug, Arbitrary)]
enum Op {
    Query(u16, u16),
    Assign(u16, u16, i16),
    Add(u16, u16, i16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    source: Vec<i32>,
    ops: Vec<Op>,
}

// Out of range indices are passed through unchanged so rejections are compared too.
fuzz_target!(|input: Input| {
    let mut reference: Vec<i64> = input.source.iter().map(|v| *v as i64).collect();
    let Ok(mut array) = ArrayBasedSegmentTree::<I64SumAggregator>::new(&reference) else {
        assert!(reference.is_empty());
        return;
    };
    let mut node = NodeBasedSegmentTree::<I64SumAggregator>::new(&reference).unwrap();
    let mut lazy = LazySumSegmentTree::new(&reference).unwrap();

    for op in input.ops {
        match op {
            Op::Query(start, end) => {
                let (start, end) = (start as usize, end as usize);
                let expected = naive::query::<I64SumAggregator>(&reference, start, end);
                assert_eq!(array.query(start, end), expected);
                assert_eq!(node.query(start, end), expected);
                assert_eq!(lazy.query(start, end), expected);

                let non_recursive = NonRecursiveSegmentTree::<I64SumAggregator>::new(&reference).unwrap();
                assert_eq!(non_recursive.query(start, end), expected);
            }
            Op::Assign(start, end, value) => {
                let (start, end, value) = (start as usize, end as usize, value as i64);
                let expected = naive::update_range(&mut reference, start, end, |_| value);
                assert_eq!(array.update_range(start, end, |_| value), expected);
                assert_eq!(node.update_range(start, end, |_| value), expected);
                if expected.is_ok() {
                    lazy = LazySumSegmentTree::new(&reference).unwrap();
                }
            }
            Op::Add(start, end, delta) => {
                let (start, end, delta) = (start as usize, end as usize, delta as i64);
                let expected = naive::add_range(&mut reference, start, end, delta);
                assert_eq!(array.update_range(start, end, |x| x + delta), expected);
                assert_eq!(node.update_range(start, end, |x| x + delta), expected);
                assert_eq!(lazy.update_range(start, end, delta), expected);
            }
        }
    }
});
