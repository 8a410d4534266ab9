use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::columnar::RecordTable;

/// One configuration dimension of the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Size,
    Variable,
    Threshold,
}

impl Dimension {
    /// Value of this dimension in row `i`.
    pub fn value(self, table: &RecordTable, i: usize) -> u64 {
        match self {
            Dimension::Size => table.size[i],
            Dimension::Variable => table.variable[i],
            Dimension::Threshold => table.threshold[i],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: u64,
    pub sequential: f64,
    pub parallel: f64,
    pub speedup: f64,
}

/// Plot-ready view: points sorted ascending by the varying dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x as f64).collect()
    }

    pub fn sequential(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.sequential).collect()
    }

    pub fn parallel(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.parallel).collect()
    }

    pub fn speedup(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.speedup).collect()
    }

    /// Speedup divided by the varying value; meaningful when the varying
    /// dimension is the thread count.
    pub fn efficiency(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.speedup / p.x as f64)
            .collect()
    }
}

/// Select the rows whose `fixed` dimensions match exactly, then index the
/// survivors by the `varying` dimension. An empty result is a defined
/// "no data" outcome, never an error. If a varying value repeats under
/// identical fixed constraints the first occurrence wins and the
/// duplicate is reported, so the view is deterministic.
pub fn filter_by(table: &RecordTable, fixed: &[(Dimension, u64)], varying: Dimension) -> Series {
    let mut by_x: BTreeMap<u64, SeriesPoint> = BTreeMap::new();
    for i in 0..table.len() {
        if fixed.iter().any(|&(dim, v)| dim.value(table, i) != v) {
            continue;
        }
        let x = varying.value(table, i);
        if by_x.contains_key(&x) {
            log::warn!(
                "duplicate value {} of the varying dimension under fixed constraints {:?}; keeping the first occurrence",
                x,
                fixed
            );
            continue;
        }
        by_x.insert(
            x,
            SeriesPoint {
                x,
                sequential: table.sequential[i],
                parallel: table.parallel[i],
                speedup: table.speedup[i],
            },
        );
    }
    Series {
        points: by_x.into_values().collect(),
    }
}
