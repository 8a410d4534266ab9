use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::data::columnar::RecordTable;

const COLUMNS: [&str; 7] = [
    "size",
    "variable",
    "threshold",
    "sequential",
    "parallel",
    "speedup",
    "iteration",
];

/// Export the table as columnar JSON: {"columns": [...], "data": [[...]]}.
/// Row-major data, one inner array per record, same shape the analysis
/// tooling already consumes.
pub fn export_table(table: &RecordTable, path: &Path) -> Result<()> {
    let data: Vec<_> = (0..table.len())
        .map(|i| {
            json!([
                table.size[i],
                table.variable[i],
                table.threshold[i],
                table.sequential[i],
                table.parallel[i],
                table.speedup[i],
                table.iteration[i],
            ])
        })
        .collect();
    let doc = json!({ "columns": COLUMNS, "data": data });
    let text = serde_json::to_string_pretty(&doc)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columnar::Record;

    #[test]
    fn exports_one_row_per_record() {
        let mut t = RecordTable::new();
        t.push(
            Record {
                size: 1000,
                variable: 4,
                threshold: 100,
                sequential: 2.0,
                parallel: 1.0,
                speedup: 2.0,
            },
            2,
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        export_table(&t, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["columns"].as_array().unwrap().len(), 7);
        assert_eq!(v["data"][0][0], 1000);
        assert_eq!(v["data"][0][6], 2);
    }
}
