//! Saved PMD report import pipeline.
//!
//! Walks a directory of PMD reports (XML or JSON), derives each report's
//! grouping key from its relative path and aggregates the extracted
//! `pmd_cognitive` / `pmd_cyclomatic` totals per group.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{Aggregator, GroupKey, Metric, MetricRecord, SummaryRow};
use crate::core::{AnalysisContext, Analyzer as AnalyzerTrait, Result};
use crate::external::PmdReport;
use crate::report::{self, Report};

/// File extensions treated as reports.
pub const REPORT_EXTENSIONS: &[&str] = &["xml", "json"];

const IMPORTED_METRICS: [Metric; 2] = [Metric::PmdCognitive, Metric::PmdCyclomatic];

/// Report import pipeline.
#[derive(Debug, Default)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Self
    }
}

impl AnalyzerTrait for Analyzer {
    type Output = Analysis;

    fn name(&self) -> &'static str {
        "import"
    }

    fn description(&self) -> &'static str {
        "Import saved PMD complexity reports and aggregate per group"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output> {
        let start = Instant::now();
        let total = ctx.files.len();
        let counter = AtomicUsize::new(0);
        let key_len = ctx.config.grouping.labels.len();

        let (mut reports, aggregator) = ctx
            .files
            .files()
            .par_iter()
            .fold(
                || (Vec::new(), Aggregator::new(key_len)),
                |(mut reports, mut aggregator), path| {
                    match PmdReport::load(path) {
                        Ok(report) => {
                            let key = GroupKey(ctx.key_components(path));
                            let values: BTreeMap<Metric, f64> = report
                                .measurements()
                                .into_iter()
                                .map(|m| (m.metric, m.value))
                                .collect();
                            for metric in IMPORTED_METRICS {
                                aggregator.declare(&key, metric);
                            }
                            for (metric, value) in &values {
                                aggregator.add(MetricRecord::new(key.clone(), *metric, *value));
                            }
                            reports.push(ImportedReport {
                                key,
                                report: ctx.files.relative_path(path).display().to_string(),
                                values,
                            });
                        }
                        Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
                    }

                    let current = counter.fetch_add(1, Ordering::Relaxed) + 1;
                    ctx.report_progress(current, total);

                    (reports, aggregator)
                },
            )
            .reduce(
                || (Vec::new(), Aggregator::new(key_len)),
                |(mut reports, mut aggregator), (other_reports, other)| {
                    reports.extend(other_reports);
                    aggregator.merge(other);
                    (reports, aggregator)
                },
            );

        reports.sort_by(|a, b| a.report.cmp(&b.report));

        let analysis = Analysis {
            labels: ctx.config.grouping.labels.clone(),
            summary: aggregator.summaries(),
            skipped_records: aggregator.skipped(),
            reports,
        };

        tracing::info!(
            "Import completed in {:?}: {} reports, {} groups",
            start.elapsed(),
            analysis.reports.len(),
            analysis.summary.len()
        );

        Ok(analysis)
    }
}

/// Full import result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub labels: Vec<String>,
    pub reports: Vec<ImportedReport>,
    pub summary: Vec<SummaryRow>,
    pub skipped_records: usize,
}

/// Values extracted from one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedReport {
    pub key: GroupKey,
    /// Report path relative to the reports root.
    pub report: String,
    pub values: BTreeMap<Metric, f64>,
}

impl Analysis {
    /// Render as summary and detailed tables.
    pub fn to_report(&self) -> Report {
        let detailed = self
            .reports
            .iter()
            .map(|imported| {
                let mut row = report::key_columns(&self.labels, imported.key.labels());
                row.insert("report".to_string(), Value::from(imported.report.clone()));
                for metric in IMPORTED_METRICS {
                    row.insert(
                        metric.to_string(),
                        report::optional(imported.values.get(&metric).copied()),
                    );
                }
                row
            })
            .collect();

        Report {
            command: "import".to_string(),
            files_analyzed: self.reports.len(),
            skipped_records: self.skipped_records,
            summary: report::summary_rows(&self.labels, &self.summary),
            detailed,
        }
    }
}
