use anyhow::{Context, Result};
use regex::Regex;

use crate::data::columnar::Record;

/// Which benchmark sweep produced the log, i.e. which label plays the
/// varying-dimension role. One generic pipeline parameterized by this
/// enum replaces the per-sweep script variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Thread-count sweep ("Потоки: N").
    Threads,
    /// Recursion-depth sweep ("Глубина: N").
    Depth,
    /// Parallelism-threshold sweep; the threshold field itself is the
    /// dimension under study.
    Threshold,
}

impl Variant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "threads" => Some(Variant::Threads),
            "depth" => Some(Variant::Depth),
            "threshold" => Some(Variant::Threshold),
            _ => None,
        }
    }

    /// Human label for the varying dimension, used on chart axes.
    pub fn axis_label(self) -> &'static str {
        match self {
            Variant::Threads => "Threads",
            Variant::Depth => "Recursion depth",
            Variant::Threshold => "Parallelism threshold",
        }
    }

    /// Filename stem of the varying-dimension impact chart.
    pub fn chart_stem(self) -> &'static str {
        match self {
            Variant::Threads => "threads_impact",
            Variant::Depth => "depth_impact",
            Variant::Threshold => "threshold_impact",
        }
    }

    fn measurement_pattern(self) -> String {
        const INT: &str = r"\d+";
        const DEC: &str = r"\d+(?:\.\d+)?";
        let head = match self {
            Variant::Threads => format!(
                r"Размер:\s*(?P<size>{INT}).*?Потоки:\s*(?P<var>{INT}).*?Порог пар\.:\s*(?P<threshold>{INT})"
            ),
            Variant::Depth => format!(
                r"Размер:\s*(?P<size>{INT}).*?Глубина:\s*(?P<var>{INT}).*?Порог пар\.:\s*(?P<threshold>{INT})"
            ),
            // No separate varying label: the threshold capture feeds
            // both the variable and the threshold field.
            Variant::Threshold => format!(
                r"Размер:\s*(?P<size>{INT}).*?Порог пар\.:\s*(?P<threshold>{INT})"
            ),
        };
        format!(
            r"{head}.*?Послед\.:\s*(?P<seq>{DEC}).*?Паралл\.:\s*(?P<par>{DEC}).*?Ускорение:\s*(?P<speedup>{DEC})"
        )
    }
}

/// Applies the fixed measurement grammar to single lines of text.
/// Compiled once per run; matching never fails, it just yields `None`.
pub struct LineMatcher {
    variant: Variant,
    measurement: Regex,
    iteration: Regex,
}

impl LineMatcher {
    pub fn new(variant: Variant) -> Result<Self> {
        let measurement = Regex::new(&variant.measurement_pattern())
            .context("compiling measurement pattern")?;
        let iteration = Regex::new(r"===\s*(?:Iteration|Итерация)\s*(?P<iter>\d+)")
            .context("compiling iteration-marker pattern")?;
        Ok(Self {
            variant,
            measurement,
            iteration,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Full grammar match or nothing; partial records are never produced.
    pub fn match_line(&self, line: &str) -> Option<Record> {
        let caps = self.measurement.captures(line)?;
        let int = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u64>().ok());
        let dec = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<f64>().ok());
        let threshold = int("threshold")?;
        let variable = match self.variant {
            Variant::Threshold => threshold,
            _ => int("var")?,
        };
        Some(Record {
            size: int("size")?,
            variable,
            threshold,
            sequential: dec("seq")?,
            parallel: dec("par")?,
            speedup: dec("speedup")?,
        })
    }

    /// Iteration-boundary marker: "=== Iteration N" / "=== Итерация N".
    /// Returns the iteration number if the line is a marker.
    pub fn match_iteration(&self, line: &str) -> Option<u32> {
        let caps = self.iteration.captures(line)?;
        caps.name("iter").and_then(|m| m.as_str().parse().ok())
    }
}
