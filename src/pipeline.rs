use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::aggregate::{aggregate, group_means};
use crate::data::columnar::RecordTable;
use crate::data::loader::load_log;
use crate::data::matcher::{LineMatcher, Variant};
use crate::plot::html::{write_chart, Trace};
use crate::plot::json::export_table;
use crate::views::{filter_by, Dimension, Series};

/// One pipeline invocation: one log file in, chart files out.
pub struct Config {
    pub variant: Variant,
    pub log_path: PathBuf,
    /// Output directory, or "dir/prefix" to also prefix chart filenames.
    pub output: Option<String>,
    pub export_table: Option<PathBuf>,
}

/// Split the output argument into directory and filename prefix. An
/// argument without a separator is a directory; with one, everything
/// after the last separator is the prefix (either side may be empty).
pub fn resolve_output(arg: Option<&str>) -> (PathBuf, String) {
    match arg {
        None => (PathBuf::from("."), String::new()),
        Some(s) => match s.rfind('/') {
            Some(idx) => {
                let dir = if idx == 0 { "/" } else { &s[..idx] };
                (PathBuf::from(dir), s[idx + 1..].to_string())
            }
            None => (PathBuf::from(s), String::new()),
        },
    }
}

/// Most frequent value of a dimension, smallest value on ties. The sweep
/// logs repeat their baseline value on every line of the sweep, so the
/// mode recovers the fixed-parameter constants without hardcoding them.
fn modal_value(table: &RecordTable, dim: Dimension) -> u64 {
    (0..table.len())
        .map(|i| dim.value(table, i))
        .counts()
        .into_iter()
        .sorted_by_key(|&(value, count)| (Reverse(count), value))
        .next()
        .map(|(value, _)| value)
        .unwrap_or(0)
}

fn emit_impact_chart(
    series: &Series,
    title: &str,
    x_label: &str,
    path: &Path,
) -> Result<()> {
    if series.is_empty() {
        println!("No data for \"{}\", chart skipped", title);
        return Ok(());
    }
    let traces = vec![
        Trace::new("Sequential (s)", series.xs(), series.sequential()),
        Trace::new("Parallel (s)", series.xs(), series.parallel()),
        Trace::new("Speedup (x)", series.xs(), series.speedup()),
    ];
    write_chart(path, title, x_label, "Time, s / speedup ratio", &traces)?;
    println!("Chart saved: {}", path.display());
    Ok(())
}

fn emit_speedup_efficiency_chart(series: &Series, path: &Path) -> Result<()> {
    if series.is_empty() {
        println!("No data for the speedup/efficiency chart, skipped");
        return Ok(());
    }
    let traces = vec![
        Trace::new("Speedup", series.xs(), series.speedup()),
        Trace::new("Efficiency", series.xs(), series.efficiency()),
    ];
    write_chart(
        path,
        "Speedup and efficiency vs thread count",
        "Threads",
        "Ratio",
        &traces,
    )?;
    println!("Chart saved: {}", path.display());
    Ok(())
}

pub fn run(cfg: &Config) -> Result<()> {
    if !cfg.log_path.exists() {
        println!("Log file not found: {}", cfg.log_path.display());
        return Ok(());
    }

    let matcher = LineMatcher::new(cfg.variant)?;
    let table = load_log(&cfg.log_path, &matcher)?;
    println!(
        "Parsed {} measurement record(s) across {} iteration(s)",
        table.len(),
        table.max_iteration()
    );
    if table.is_empty() {
        println!("Nothing to plot");
        return Ok(());
    }

    let benchmark_log = cfg
        .log_path
        .file_name()
        .map(|n| n.to_string_lossy().contains("benchmark"))
        .unwrap_or(false);

    let (out_dir, mut prefix) = resolve_output(cfg.output.as_deref());
    if benchmark_log && prefix.is_empty() {
        prefix = "benchmark_".to_string();
    }
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    // Benchmark-marked logs always get averaged, even when single-iteration.
    let table = if benchmark_log {
        group_means(&table)
    } else {
        aggregate(&table)
    };

    if let Some(path) = &cfg.export_table {
        export_table(&table, path)?;
        println!("Table exported: {}", path.display());
    }

    let size_fix = modal_value(&table, Dimension::Size);
    let var_fix = modal_value(&table, Dimension::Variable);
    let thr_fix = modal_value(&table, Dimension::Threshold);
    log::debug!(
        "fixed baselines: size={} variable={} threshold={}",
        size_fix,
        var_fix,
        thr_fix
    );

    let chart_path = |stem: &str| out_dir.join(format!("{}{}.html", prefix, stem));

    // Input-size sweep with the other two dimensions at their baseline.
    let size_series = filter_by(
        &table,
        &[(Dimension::Variable, var_fix), (Dimension::Threshold, thr_fix)],
        Dimension::Size,
    );
    emit_impact_chart(
        &size_series,
        "Impact of input size",
        "Input size",
        &chart_path("size_impact"),
    )?;

    // Varying-dimension sweep. For the threshold variant the variable
    // column is the threshold itself, so only the size can stay fixed.
    let var_fixed: Vec<(Dimension, u64)> = match cfg.variant {
        Variant::Threshold => vec![(Dimension::Size, size_fix)],
        _ => vec![(Dimension::Size, size_fix), (Dimension::Threshold, thr_fix)],
    };
    let var_series = filter_by(&table, &var_fixed, Dimension::Variable);
    emit_impact_chart(
        &var_series,
        &format!("Impact of {}", cfg.variant.axis_label().to_lowercase()),
        cfg.variant.axis_label(),
        &chart_path(cfg.variant.chart_stem()),
    )?;

    // Threshold sweep; coincides with the chart above for the threshold
    // variant, so it is only emitted for the other two.
    if cfg.variant != Variant::Threshold {
        let threshold_series = filter_by(
            &table,
            &[(Dimension::Size, size_fix), (Dimension::Variable, var_fix)],
            Dimension::Threshold,
        );
        emit_impact_chart(
            &threshold_series,
            "Impact of parallelism threshold",
            "Parallelism threshold",
            &chart_path("threshold_impact"),
        )?;
    }

    if cfg.variant == Variant::Threads {
        emit_speedup_efficiency_chart(&var_series, &chart_path("speedup_efficiency"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columnar::Record;

    #[test]
    fn output_argument_splits_into_dir_and_prefix() {
        assert_eq!(resolve_output(None), (PathBuf::from("."), String::new()));
        assert_eq!(
            resolve_output(Some("charts")),
            (PathBuf::from("charts"), String::new())
        );
        assert_eq!(
            resolve_output(Some("charts/run1_")),
            (PathBuf::from("charts"), "run1_".to_string())
        );
        assert_eq!(
            resolve_output(Some("charts/")),
            (PathBuf::from("charts"), String::new())
        );
        assert_eq!(
            resolve_output(Some("out/sub/p_")),
            (PathBuf::from("out/sub"), "p_".to_string())
        );
    }

    #[test]
    fn modal_value_prefers_most_frequent_then_smallest() {
        let mut t = RecordTable::new();
        for variable in [4, 8, 8, 2, 4] {
            t.push(
                Record {
                    size: 1000,
                    variable,
                    threshold: 100,
                    sequential: 1.0,
                    parallel: 1.0,
                    speedup: 1.0,
                },
                1,
            );
        }
        // 4 and 8 both appear twice; the smaller wins.
        assert_eq!(modal_value(&t, Dimension::Variable), 4);
        assert_eq!(modal_value(&t, Dimension::Size), 1000);
    }
}
