use itertools::Itertools;

use crate::data::columnar::RecordTable;

/// Average repeated trials across iterations. Single-iteration tables are
/// returned unchanged, so the operation is idempotent.
pub fn aggregate(table: &RecordTable) -> RecordTable {
    if table.max_iteration() <= 1 {
        return table.clone();
    }
    group_means(table)
}

/// Reduce every group of rows sharing a grouping key to one row holding
/// the arithmetic mean of the three measurement columns. The iteration
/// column collapses to all-1. Output rows are sorted by key.
pub fn group_means(table: &RecordTable) -> RecordTable {
    let groups = (0..table.len())
        .map(|i| (table.key(i), i))
        .into_group_map();

    let mut out = RecordTable::new();
    for (key, rows) in groups.into_iter().sorted_by_key(|entry| entry.0) {
        let n = rows.len() as f64;
        let mean = |col: &[f64]| rows.iter().map(|&i| col[i]).sum::<f64>() / n;
        let (size, variable, threshold) = key;
        out.size.push(size);
        out.variable.push(variable);
        out.threshold.push(threshold);
        out.sequential.push(mean(&table.sequential));
        out.parallel.push(mean(&table.parallel));
        out.speedup.push(mean(&table.speedup));
        out.iteration.push(1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columnar::{GroupKey, Record};

    const TOL: f64 = 1e-9;

    fn push(t: &mut RecordTable, key: GroupKey, seq: f64, par: f64, speedup: f64, iter: u32) {
        t.push(
            Record {
                size: key.0,
                variable: key.1,
                threshold: key.2,
                sequential: seq,
                parallel: par,
                speedup,
            },
            iter,
        );
    }

    #[test]
    fn single_iteration_table_is_returned_unchanged() {
        let mut t = RecordTable::new();
        push(&mut t, (1000, 4, 100), 2.0, 1.0, 2.0, 1);
        push(&mut t, (1000, 8, 100), 2.0, 0.5, 4.0, 1);
        let out = aggregate(&t);
        assert_eq!(out.len(), 2);
        assert_eq!(out.speedup, t.speedup);
        assert_eq!(out.iteration, t.iteration);
    }

    #[test]
    fn means_across_iterations() {
        let mut t = RecordTable::new();
        push(&mut t, (1000, 4, 100), 2.0, 1.0, 2.0, 1);
        push(&mut t, (1000, 4, 100), 4.0, 1.0, 4.0, 2);
        let out = aggregate(&t);
        assert_eq!(out.len(), 1);
        assert!((out.sequential[0] - 3.0).abs() < TOL);
        assert!((out.speedup[0] - 3.0).abs() < TOL);
        assert_eq!(out.iteration, vec![1]);
    }

    #[test]
    fn mean_over_n_iterations_matches_sum_over_n() {
        let mut t = RecordTable::new();
        let values = [2.0, 3.5, 1.25, 4.75, 0.5];
        for (i, &v) in values.iter().enumerate() {
            push(&mut t, (500, 2, 50), v, v / 2.0, 2.0, (i + 1) as u32);
        }
        let out = aggregate(&t);
        let expected = values.iter().sum::<f64>() / values.len() as f64;
        assert_eq!(out.len(), 1);
        assert!((out.sequential[0] - expected).abs() < TOL);
        assert!((out.parallel[0] - expected / 2.0).abs() < TOL);
    }

    #[test]
    fn key_seen_in_one_iteration_still_aggregates() {
        let mut t = RecordTable::new();
        push(&mut t, (1000, 4, 100), 2.0, 1.0, 2.0, 1);
        push(&mut t, (2000, 4, 100), 6.0, 2.0, 3.0, 2);
        let out = aggregate(&t);
        assert_eq!(out.len(), 2);
        // Mean of one value is that value.
        assert_eq!(out.sequential, vec![2.0, 6.0]);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let mut t = RecordTable::new();
        push(&mut t, (1000, 4, 100), 2.0, 1.0, 2.0, 1);
        push(&mut t, (1000, 4, 100), 4.0, 2.0, 4.0, 2);
        push(&mut t, (1000, 8, 100), 1.0, 0.2, 5.0, 2);
        let once = aggregate(&t);
        let twice = aggregate(&once);
        assert_eq!(once.len(), twice.len());
        assert_eq!(once.sequential, twice.sequential);
        assert_eq!(once.parallel, twice.parallel);
        assert_eq!(once.speedup, twice.speedup);
    }

    #[test]
    fn forced_grouping_merges_duplicates_within_one_iteration() {
        let mut t = RecordTable::new();
        push(&mut t, (1000, 4, 100), 2.0, 1.0, 2.0, 1);
        push(&mut t, (1000, 4, 100), 4.0, 3.0, 4.0, 1);
        // aggregate() short-circuits, group_means() does not.
        assert_eq!(aggregate(&t).len(), 2);
        let forced = group_means(&t);
        assert_eq!(forced.len(), 1);
        assert!((forced.parallel[0] - 2.0).abs() < TOL);
    }

    #[test]
    fn output_is_sorted_by_grouping_key() {
        let mut t = RecordTable::new();
        push(&mut t, (2000, 8, 100), 1.0, 1.0, 1.0, 1);
        push(&mut t, (1000, 4, 100), 1.0, 1.0, 1.0, 2);
        push(&mut t, (1000, 2, 100), 1.0, 1.0, 1.0, 2);
        let out = aggregate(&t);
        let keys: Vec<_> = (0..out.len()).map(|i| out.key(i)).collect();
        assert_eq!(keys, vec![(1000, 2, 100), (1000, 4, 100), (2000, 8, 100)]);
    }
}
