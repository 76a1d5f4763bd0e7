//! Tabular reports produced by the batch pipelines.
//!
//! Every pipeline renders into the same shape: a summary table with one row
//! per (grouping key, metric) and a detailed table with one row per input.
//! Rows are JSON objects whose key order is the column order.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::aggregate::SummaryRow;
use crate::core::Result;
use crate::output::csv_table;

/// One table row; key order is column order.
pub type Row = Map<String, Value>;

/// Rendered result of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Pipeline name, used for CSV file names.
    pub command: String,
    /// Inputs processed.
    pub files_analyzed: usize,
    /// Records rejected by the aggregator.
    pub skipped_records: usize,
    /// Grouped statistics.
    pub summary: Vec<Row>,
    /// Per-input values.
    pub detailed: Vec<Row>,
}

impl Report {
    /// Write `<command>_detailed.csv` and `<command>_summary.csv` into `dir`.
    pub fn write_csv_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        for (suffix, rows) in [("detailed", &self.detailed), ("summary", &self.summary)] {
            let path = dir.join(format!("{}_{}.csv", self.command, suffix));
            let values: Vec<Value> = rows.iter().cloned().map(Value::Object).collect();
            std::fs::write(&path, csv_table(&values))?;
            tracing::info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Key label columns, padded with nulls when the key is shorter than the schema.
pub fn key_columns(labels: &[String], key: &[String]) -> Row {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = key.get(i).map_or(Value::Null, |v| Value::String(v.clone()));
            (label.clone(), value)
        })
        .collect()
}

/// Convert finalized aggregator rows into summary table rows.
///
/// Groups without data keep their row with a zero count and null statistics.
pub fn summary_rows(labels: &[String], rows: &[SummaryRow]) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            let mut out = key_columns(labels, row.key.labels());
            out.insert("metric".to_string(), Value::from(row.metric.as_str()));
            match &row.summary {
                Some(summary) => {
                    out.insert("count".to_string(), Value::from(summary.count));
                    out.insert("mean".to_string(), number(summary.mean));
                    out.insert("min".to_string(), number(summary.min));
                    out.insert("max".to_string(), number(summary.max));
                    out.insert("median".to_string(), number(summary.median));
                    out.insert("total".to_string(), number(summary.total));
                }
                None => {
                    out.insert("count".to_string(), Value::from(0));
                    for column in ["mean", "min", "max", "median", "total"] {
                        out.insert(column.to_string(), Value::Null);
                    }
                }
            }
            out
        })
        .collect()
}

/// JSON number for a finite value, null otherwise.
pub fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Optional value as a JSON number or null.
pub fn optional(value: Option<f64>) -> Value {
    value.map_or(Value::Null, number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Aggregator, GroupKey, Metric, MetricRecord};

    fn labels() -> Vec<String> {
        vec!["model".to_string(), "project".to_string()]
    }

    #[test]
    fn test_key_columns_pad_missing_labels() {
        let row = key_columns(&labels(), &["gpt".to_string()]);
        assert_eq!(row["model"], Value::from("gpt"));
        assert_eq!(row["project"], Value::Null);
    }

    #[test]
    fn test_summary_rows() {
        let key = GroupKey::new(["gpt", "lang"]);
        let mut agg = Aggregator::new(2);
        agg.add(MetricRecord::new(key.clone(), Metric::Cognitive, 2.0));
        agg.add(MetricRecord::new(key.clone(), Metric::Cognitive, 4.0));
        agg.declare(&key, Metric::Readability);

        let rows = summary_rows(&labels(), &agg.summaries());
        assert_eq!(rows.len(), 2);
        let columns: Vec<_> = rows[0].keys().cloned().collect();
        assert_eq!(
            columns,
            vec!["model", "project", "metric", "count", "mean", "min", "max", "median", "total"]
        );
        assert_eq!(rows[0]["mean"], Value::from(3.0));
        assert_eq!(rows[1]["metric"], Value::from("readability"));
        assert_eq!(rows[1]["count"], Value::from(0));
        assert_eq!(rows[1]["mean"], Value::Null);
    }

    #[test]
    fn test_write_csv_files() {
        let temp = tempfile::tempdir().unwrap();
        let mut row = Row::new();
        row.insert("file".to_string(), Value::from("A.java"));
        row.insert("cognitive".to_string(), Value::Null);
        let report = Report {
            command: "score".to_string(),
            files_analyzed: 1,
            skipped_records: 0,
            summary: Vec::new(),
            detailed: vec![row],
        };
        let written = report.write_csv_files(temp.path()).unwrap();
        assert_eq!(written.len(), 2);
        let detailed = std::fs::read_to_string(temp.path().join("score_detailed.csv")).unwrap();
        assert_eq!(detailed, "file,cognitive\nA.java,N/A\n");
        assert!(temp.path().join("score_summary.csv").exists());
    }

    #[test]
    fn test_number_rejects_non_finite() {
        assert_eq!(number(f64::NAN), Value::Null);
        assert_eq!(optional(None), Value::Null);
        assert_eq!(optional(Some(1.5)), Value::from(1.5));
    }
}
