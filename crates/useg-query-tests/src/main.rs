use std::{path::PathBuf, process};

use clap::{Parser, ValueEnum};
use useg::{
    aggregator::{
        max::I64MaxAggregator,
        max_subarray::I64MaxSubarraySumAggregator,
        min::I64MinAggregator,
        sum::I64SumAggregator,
    },
    naive,
};
use useg_query_tests::{OpGenerator, Summary, validate};

#[derive(Copy, Debug, Clone, PartialEq, Eq, ValueEnum)]
enum Workload {
    /// I64SumAggregator
    Sum,
    /// I64MinAggregator
    Min,
    /// I64MaxAggregator
    Max,
    /// I64MaxSubarraySumAggregator checked against Kadane's scan
    MaxSubarray,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, value_parser, default_value_t = 10_000)]
    ops: usize,
    #[clap(short, long, value_parser, default_value_t = 1000)]
    len: usize,
    #[clap(short, long, value_parser)]
    seed: Option<u64>,
    #[clap(short, long, value_parser, default_value_t = 1000)]
    max_value: u32,
    #[clap(short, long, value_enum, default_value_t = Workload::Sum)]
    aggregator: Workload,
    /// Writes a JSON latency summary to this path
    #[clap(long, value_parser)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    println!("Running useg query tests with {:#?}", args);

    let result = std::panic::catch_unwind(|| run(&args));

    match result {
        Ok(Ok(())) => {
            println!("All tests passed successfully!");
            process::exit(0);
        }
        Ok(Err(err)) => {
            eprintln!("Query tests failed: {err}");
            process::exit(1);
        }
        Err(_) => {
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.len == 0 {
        return Err("the source sequence must not be empty".into());
    }
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    println!("Using seed {seed}");

    let mut generator = OpGenerator::new(seed, args.len, args.max_value);
    let source = generator.source();
    let ops = generator.ops(args.ops);

    println!("===== VALIDATING {:?} =====", args.aggregator);
    let latencies = match args.aggregator {
        Workload::Sum => {
            validate::<I64SumAggregator>(&source, &ops, naive::query::<I64SumAggregator>)?
        }
        Workload::Min => {
            validate::<I64MinAggregator>(&source, &ops, naive::query::<I64MinAggregator>)?
        }
        Workload::Max => {
            validate::<I64MaxAggregator>(&source, &ops, naive::query::<I64MaxAggregator>)?
        }
        Workload::MaxSubarray => validate::<I64MaxSubarraySumAggregator>(
            &source,
            &ops,
            naive::max_subarray_sum::<i64>,
        )?,
    };

    for stats in &latencies {
        stats.print();
    }

    if let Some(path) = &args.output {
        Summary::new(
            seed,
            args.len,
            args.ops,
            format!("{:?}", args.aggregator),
            latencies,
        )
        .flush_to_file(path)?;
        println!("Wrote latency summary to {}", path.display());
    }

    Ok(())
}
