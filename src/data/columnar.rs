use serde::Serialize;

/// One parsed benchmark trial. Created only by the line matcher; every
/// field comes from the same log line or no record exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    pub size: u64,
    /// The dimension under study: thread count, recursion depth or
    /// parallelism threshold, depending on the log variant.
    pub variable: u64,
    pub threshold: u64,
    pub sequential: f64,
    pub parallel: f64,
    pub speedup: f64,
}

/// (size, variable, threshold) — two records with equal keys are the same
/// benchmark configuration.
pub type GroupKey = (u64, u64, u64);

/// Column-oriented accumulation of matched records, insertion order =
/// log line order. Rebuilt from scratch on every run, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordTable {
    pub size: Vec<u64>,
    pub variable: Vec<u64>,
    pub threshold: Vec<u64>,
    pub sequential: Vec<f64>,
    pub parallel: Vec<f64>,
    pub speedup: Vec<f64>,
    /// Iteration tag per row, >= 1. After aggregation the column is
    /// reset to all-1 since the tag no longer means anything.
    pub iteration: Vec<u32>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rec: Record, iteration: u32) {
        self.size.push(rec.size);
        self.variable.push(rec.variable);
        self.threshold.push(rec.threshold);
        self.sequential.push(rec.sequential);
        self.parallel.push(rec.parallel);
        self.speedup.push(rec.speedup);
        self.iteration.push(iteration);
    }

    pub fn len(&self) -> usize {
        self.size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Grouping key of row `i`.
    pub fn key(&self, i: usize) -> GroupKey {
        (self.size[i], self.variable[i], self.threshold[i])
    }

    /// Highest iteration tag present; 1 for an empty table.
    pub fn max_iteration(&self) -> u32 {
        self.iteration.iter().copied().max().unwrap_or(1)
    }
}
