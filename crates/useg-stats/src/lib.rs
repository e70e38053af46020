//! Latency sketches used by the `profiler` feature of useg.
//!
//! A [Sketch] is cheap to clone and shares its underlying DDSketch, which lets a [Measure]
//! guard record into it without holding a borrow for the duration of the measured scope.

use core::{cell::RefCell, fmt};
use minstant::Instant;
use sketches_ddsketch::{Config, DDSketch};
use std::rc::Rc;

/// Records the time until the end of the current scope into a [Sketch]
///
/// ```
/// use useg_stats::{profile_scope, Sketch};
///
/// let sketch = Sketch::default();
/// {
///     profile_scope!(&sketch);
/// }
/// assert_eq!(sketch.percentiles().count, 1);
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _measure = $crate::Measure::new($sketch);
    };
}

fn quantile(sketch: &DDSketch, q: f64) -> f64 {
    sketch.quantile(q).ok().flatten().unwrap_or(0.0)
}

/// Summarizes the distribution recorded in a DDSketch
pub fn sketch_percentiles(sketch: &DDSketch) -> Percentiles {
    Percentiles {
        count: sketch.count(),
        min: sketch.min().unwrap_or(0.0),
        p50: quantile(sketch, 0.5),
        p99: quantile(sketch, 0.99),
        p99_9: quantile(sketch, 0.999),
        p99_99: quantile(sketch, 0.9999),
        p99_999: quantile(sketch, 0.99999),
        max: sketch.max().unwrap_or(0.0),
    }
}

/// Latency percentiles in nanoseconds
#[derive(Default, Clone, Copy, PartialEq)]
pub struct Percentiles {
    /// Number of recorded samples
    pub count: usize,
    /// Smallest sample
    pub min: f64,
    /// Median
    pub p50: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p99_9: f64,
    /// 99.99th percentile
    pub p99_99: f64,
    /// 99.999th percentile
    pub p99_999: f64,
    /// Largest sample
    pub max: f64,
}

impl fmt::Debug for Percentiles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Percentiles")
            .field("count", &self.count)
            .field("min", &format_args!("{:.2}ns", self.min))
            .field("p50", &format_args!("{:.2}ns", self.p50))
            .field("p99", &format_args!("{:.2}ns", self.p99))
            .field("p99.9", &format_args!("{:.2}ns", self.p99_9))
            .field("p99.99", &format_args!("{:.2}ns", self.p99_99))
            .field("p99.999", &format_args!("{:.2}ns", self.p99_999))
            .field("max", &format_args!("{:.2}ns", self.max))
            .finish()
    }
}

/// A shared, single-threaded latency sketch
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone)]
pub struct Sketch {
    inner: Rc<RefCell<DDSketch>>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DDSketch::new(Config::new(0.01, 2048, 1.0e-9)))),
        }
    }
}

impl fmt::Debug for Sketch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.percentiles(), f)
    }
}

impl Sketch {
    /// Records a sample
    #[inline]
    pub fn add(&self, data: f64) {
        self.inner.borrow_mut().add(data)
    }
    /// Returns the percentiles of every sample recorded so far
    pub fn percentiles(&self) -> Percentiles {
        sketch_percentiles(&self.inner.borrow())
    }
}

/// Drop guard that records its own lifetime in nanoseconds
pub struct Measure {
    start: Instant,
    sketch: Sketch,
}

impl Measure {
    /// Starts measuring into `sketch`
    #[inline]
    pub fn new(sketch: &Sketch) -> Measure {
        Measure {
            sketch: sketch.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for Measure {
    #[inline]
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}
