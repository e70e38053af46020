use std::{
    error::Error,
    fmt::Debug,
    fs::File,
    path::Path,
    time::{Duration, Instant},
};

use hdrhistogram::Histogram;
use pbr::ProgressBar;
use useg::{
    AnySegmentTree,
    Backing,
    LazySumSegmentTree,
    RangeQuery,
    RangeUpdate,
    aggregator::Aggregator,
    naive,
};

/// Answers a range query directly on the reference sequence
pub type Oracle<T> = fn(&[i64], usize, usize) -> Result<T, useg::Error>;

/// A single step of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Query { start: usize, end: usize },
    Assign { start: usize, end: usize, value: i64 },
    Add { start: usize, end: usize, delta: i64 },
}

impl Op {
    /// Returns the inclusive range this operation touches
    pub fn range(&self) -> (usize, usize) {
        match *self {
            Op::Query { start, end }
            | Op::Assign { start, end, .. }
            | Op::Add { start, end, .. } => (start, end),
        }
    }
}

/// Generates a reproducible source sequence and operation mix from a seed
pub struct OpGenerator {
    rng: fastrand::Rng,
    len: usize,
    max_value: i64,
}

impl OpGenerator {
    pub fn new(seed: u64, len: usize, max_value: u32) -> Self {
        assert!(len > 0, "cannot generate ranges over an empty sequence");
        Self {
            rng: fastrand::Rng::with_seed(seed),
            len,
            max_value: max_value as i64,
        }
    }

    pub fn source(&mut self) -> Vec<i64> {
        (0..self.len).map(|_| self.value()).collect()
    }

    pub fn ops(&mut self, count: usize) -> Vec<Op> {
        (0..count).map(|_| self.op()).collect()
    }

    // 80% queries, 10% assignments and 10% additions
    fn op(&mut self) -> Op {
        let start = self.rng.usize(0..self.len);
        let end = self.rng.usize(start..self.len);
        match self.rng.u8(0..10) {
            0 => Op::Assign {
                start,
                end,
                value: self.value(),
            },
            1 => Op::Add {
                start,
                end,
                delta: self.value(),
            },
            _ => Op::Query { start, end },
        }
    }

    fn value(&mut self) -> i64 {
        self.rng.i64(-self.max_value..=self.max_value)
    }
}

/// Runs `ops` against every backing of `A` and the lazy sum tree, checking each answer against
/// `oracle` evaluated on a plain copy of `source`.
///
/// Panics through `pretty_assertions` on the first mismatch and returns the query latencies of
/// every tree.
pub fn validate<A>(
    source: &[i64],
    ops: &[Op],
    oracle: Oracle<A::Aggregate>,
) -> Result<Vec<LatencyStats>, Box<dyn Error>>
where
    A: Aggregator<Input = i64>,
    A::Aggregate: PartialEq + Debug,
{
    let mut reference = source.to_vec();
    let mut trees = Backing::ALL
        .iter()
        .map(|backing| AnySegmentTree::<A>::with_backing(source, *backing))
        .collect::<Result<Vec<_>, _>>()?;
    let mut lazy = LazySumSegmentTree::new(source)?;

    let mut hists = Backing::ALL
        .iter()
        .map(|_| Histogram::<u64>::new(4))
        .collect::<Result<Vec<_>, _>>()?;
    let mut lazy_hist = Histogram::<u64>::new(4)?;

    let mut pb = ProgressBar::new(ops.len() as u64);
    pb.format("╢▌▌░╟");
    for op in ops {
        match *op {
            Op::Query { start, end } => {
                let expected = oracle(&reference, start, end)?;
                for (tree, hist) in trees.iter().zip(hists.iter_mut()) {
                    let now = Instant::now();
                    let result = tree.query(start, end)?;
                    hist.record(now.elapsed().as_nanos() as u64)?;
                    pretty_assertions::assert_eq!(
                        expected,
                        result,
                        "{} tree disagrees on [{}, {}]",
                        tree.backing(),
                        start,
                        end
                    );
                }

                let now = Instant::now();
                let sum = lazy.query(start, end)?;
                lazy_hist.record(now.elapsed().as_nanos() as u64)?;
                pretty_assertions::assert_eq!(
                    reference[start..=end].iter().sum::<i64>(),
                    sum,
                    "lazy sum tree disagrees on [{}, {}]",
                    start,
                    end
                );
            }
            Op::Assign { start, end, value } => {
                for index in start..=end {
                    lazy.update(index, value - reference[index])?;
                }
                naive::update_range(&mut reference, start, end, |_| value)?;
                apply(&mut trees, &reference, start, end, |_| value)?;
            }
            Op::Add { start, end, delta } => {
                lazy.update_range(start, end, delta)?;
                naive::add_range(&mut reference, start, end, delta)?;
                apply(&mut trees, &reference, start, end, |x| x + delta)?;
            }
        }
        pb.inc();
    }
    pb.finish_print("done");

    let mut latencies: Vec<LatencyStats> = trees
        .iter()
        .zip(hists.iter())
        .map(|(tree, hist)| LatencyStats::from_hist(tree.backing().to_string(), hist))
        .collect();
    latencies.push(LatencyStats::from_hist("lazy-sum", &lazy_hist));
    Ok(latencies)
}

// Query-only trees reject the update and are rebuilt from the already updated reference.
fn apply<A, F>(
    trees: &mut [AnySegmentTree<A>],
    reference: &[i64],
    start: usize,
    end: usize,
    updater: F,
) -> Result<(), Box<dyn Error>>
where
    A: Aggregator<Input = i64>,
    F: Fn(i64) -> i64 + Copy,
{
    for tree in trees.iter_mut() {
        match tree.update_range(start, end, updater) {
            Ok(()) => {}
            Err(err) if err.is_unsupported() => {
                log::debug!("rebuilding {} tree after a rejected update", tree.backing());
                *tree = AnySegmentTree::with_backing(reference, tree.backing())?;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Query latency percentiles of one tree in nanoseconds
#[derive(Debug, Clone, serde::Serialize)]
pub struct LatencyStats {
    pub id: String,
    pub count: u64,
    pub min: u64,
    pub p50: u64,
    pub p99: u64,
    pub p99_9: u64,
    pub p99_99: u64,
    pub max: u64,
}

impl LatencyStats {
    pub fn from_hist(id: impl Into<String>, hist: &Histogram<u64>) -> Self {
        Self {
            id: id.into(),
            count: hist.len(),
            min: hist.min(),
            p50: hist.value_at_quantile(0.5),
            p99: hist.value_at_quantile(0.99),
            p99_9: hist.value_at_quantile(0.999),
            p99_99: hist.value_at_quantile(0.9999),
            max: hist.max(),
        }
    }

    pub fn print(&self) {
        println!(
            "{} latencies:\t\tmin: {: >4}ns\tp50: {: >4}ns\tp99: {: >4}ns\tp99.9: {: >4}ns\tp99.99: \
             {: >4}ns\t max: {: >4}ns \t count: {}",
            self.id,
            Duration::from_nanos(self.min).as_nanos(),
            Duration::from_nanos(self.p50).as_nanos(),
            Duration::from_nanos(self.p99).as_nanos(),
            Duration::from_nanos(self.p99_9).as_nanos(),
            Duration::from_nanos(self.p99_99).as_nanos(),
            Duration::from_nanos(self.max).as_nanos(),
            self.count,
        );
    }
}

/// Everything needed to reproduce and compare a run
#[derive(Debug, serde::Serialize)]
pub struct Summary {
    seed: u64,
    len: usize,
    ops: usize,
    aggregator: String,
    latencies: Vec<LatencyStats>,
}

impl Summary {
    pub fn new(
        seed: u64,
        len: usize,
        ops: usize,
        aggregator: impl Into<String>,
        latencies: Vec<LatencyStats>,
    ) -> Self {
        Self {
            seed,
            len,
            ops,
            aggregator: aggregator.into(),
            latencies,
        }
    }

    pub fn flush_to_file(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use useg::aggregator::{max_subarray::I64MaxSubarraySumAggregator, sum::I64SumAggregator};

    #[test]
    fn generator_is_reproducible() {
        let mut a = OpGenerator::new(7, 64, 100);
        let mut b = OpGenerator::new(7, 64, 100);
        assert_eq!(a.source(), b.source());
        let ops = a.ops(500);
        assert_eq!(ops, b.ops(500));
        for op in ops {
            let (start, end) = op.range();
            assert!(start <= end && end < 64);
        }
    }

    #[test]
    fn small_runs_pass() {
        let mut generator = OpGenerator::new(42, 37, 50);
        let source = generator.source();
        let ops = generator.ops(300);

        let latencies =
            validate::<I64SumAggregator>(&source, &ops, naive::query::<I64SumAggregator>).unwrap();
        assert_eq!(latencies.len(), Backing::ALL.len() + 1);
        assert_eq!(latencies[0].id, "array-based");
        assert_eq!(latencies[0].count, latencies[3].count);

        validate::<I64MaxSubarraySumAggregator>(&source, &ops, naive::max_subarray_sum::<i64>)
            .unwrap();
    }
}
