use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::columnar::RecordTable;
use crate::data::matcher::LineMatcher;

/// Scan lines into a record table. The current iteration is an explicit
/// fold accumulator, starting at 1; marker lines update it and are
/// consumed, every other line goes to the matcher.
pub fn scan_lines<I, S>(lines: I, matcher: &LineMatcher) -> RecordTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = RecordTable::new();
    let mut current_iteration: u32 = 1;
    for line in lines {
        let line = line.as_ref();
        if let Some(n) = matcher.match_iteration(line) {
            current_iteration = n;
            continue;
        }
        if let Some(rec) = matcher.match_line(line) {
            table.push(rec, current_iteration);
        } else {
            log::trace!("skipped line: {}", line);
        }
    }
    table
}

/// Read a log file line by line and build the record table.
pub fn load_log(path: &Path, matcher: &LineMatcher) -> Result<RecordTable> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(scan_lines(&lines, matcher))
}
