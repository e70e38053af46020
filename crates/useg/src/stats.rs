use core::fmt;
use useg_stats::Sketch;

/// Latency stats of a segment tree
#[derive(Clone, Default)]
pub struct Stats {
    /// A sketch for recording latencies of building the tree
    pub build: Sketch,
    /// A sketch for recording latencies of range queries
    pub query: Sketch,
    /// A sketch for recording latencies of range updates
    pub update: Sketch,
}

impl fmt::Debug for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Segment Tree Stats")
            .field("build", &self.build.percentiles())
            .field("query", &self.query.percentiles())
            .field("update", &self.update.percentiles())
            .finish()
    }
}
