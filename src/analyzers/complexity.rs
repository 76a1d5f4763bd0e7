//! Complexity scoring pipeline.
//!
//! Parses every Java file, scores it with the selected rule policies,
//! optionally asks PMD and the readability model for their view, and folds
//! the resulting records into grouped statistics.
//!
//! # Example
//!
//! ```no_run
//! use cxlens::analyzers::complexity::{Analyzer, MetricSource};
//! use cxlens::core::{AnalysisContext, Analyzer as AnalyzerTrait, FileSet};
//! use cxlens::config::Config;
//! use cxlens::external::ProcessRunner;
//! use cxlens::tree::JavaTreeProvider;
//!
//! let config = Config::default();
//! let files = FileSet::from_path(".", &config).unwrap();
//! let provider = JavaTreeProvider::new().unwrap();
//! let ctx = AnalysisContext::new(&files, &config, &provider, &ProcessRunner);
//!
//! let analyzer = Analyzer::new(vec![MetricSource::Cognitive, MetricSource::TestAware]);
//! let result = analyzer.analyze(&ctx).unwrap();
//! println!("Scored {} files", result.files.len());
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{Aggregator, GroupKey, Metric, MetricRecord, SummaryRow};
use crate::core::{AnalysisContext, Analyzer as AnalyzerTrait, Result, SourceFile};
use crate::engine::{self, MethodScore, Policy, PolicyKind, Traversal};
use crate::external::{ExternalAnalyzer, PmdRunner, ReadabilityRetriever};
use crate::report::{self, Report};
use crate::tree::NodeKind;

/// A metric family the pipeline can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricSource {
    Cognitive,
    TestAware,
    Cyclomatic,
    Pmd,
    Readability,
}

impl MetricSource {
    /// Metrics computed when no selection is given.
    pub const DEFAULT: [MetricSource; 3] = [Self::Cognitive, Self::TestAware, Self::Cyclomatic];

    fn policy(self) -> Option<PolicyKind> {
        match self {
            Self::Cognitive => Some(PolicyKind::Structural),
            Self::TestAware => Some(PolicyKind::TestAware),
            Self::Cyclomatic => Some(PolicyKind::Cyclomatic),
            Self::Pmd | Self::Readability => None,
        }
    }

    /// Metrics this source contributes to the report.
    pub fn metrics(self) -> &'static [Metric] {
        match self {
            Self::Cognitive => &[Metric::Cognitive],
            Self::TestAware => &[Metric::TestAware],
            Self::Cyclomatic => &[Metric::Cyclomatic, Metric::Maintainability],
            Self::Pmd => &[Metric::PmdCognitive, Metric::PmdCyclomatic],
            Self::Readability => &[Metric::Readability],
        }
    }
}

/// Comment lines per non-blank line, `None` for empty files.
pub fn comment_density(loc: usize, comment_lines: usize) -> Option<f64> {
    (loc > 0).then(|| comment_lines as f64 / loc as f64)
}

/// Normalized maintainability index in [0, 100].
///
/// `loc` is the number of non-blank lines. A file without any comment
/// scores 0; otherwise comment density is floored at 0.01. `None` for
/// empty files.
pub fn maintainability_index(loc: usize, comment_lines: usize, cyclomatic: f64) -> Option<f64> {
    let density = comment_density(loc, comment_lines)?;
    if comment_lines == 0 {
        return Some(0.0);
    }
    let loc = loc as f64;
    let density = density.max(0.01);
    let mi = 171.0 - 5.2 * loc.ln() - 0.23 * cyclomatic - 16.2 * density.ln();
    Some((mi * 100.0 / 171.0).clamp(0.0, 100.0))
}

/// Complexity scoring pipeline.
pub struct Analyzer {
    sources: Vec<MetricSource>,
    by_method: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(MetricSource::DEFAULT.to_vec())
    }
}

impl Analyzer {
    /// Create a pipeline computing `sources` (duplicates are ignored).
    pub fn new(sources: Vec<MetricSource>) -> Self {
        let mut unique = Vec::with_capacity(sources.len());
        for source in sources {
            if !unique.contains(&source) {
                unique.push(source);
            }
        }
        Self {
            sources: unique,
            by_method: false,
        }
    }

    /// Also report one detailed row per method.
    pub fn by_method(mut self, by_method: bool) -> Self {
        self.by_method = by_method;
        self
    }

    /// Metrics produced, in report order.
    pub fn metrics(&self) -> Vec<Metric> {
        self.sources
            .iter()
            .flat_map(|s| s.metrics().iter().copied())
            .collect()
    }

    fn policies(&self) -> Vec<(PolicyKind, Policy)> {
        self.sources
            .iter()
            .filter_map(|s| s.policy())
            .map(|kind| (kind, kind.policy()))
            .collect()
    }

    fn externals<'a>(&self, ctx: &AnalysisContext<'a>) -> Vec<Box<dyn ExternalAnalyzer + 'a>> {
        let mut externals: Vec<Box<dyn ExternalAnalyzer + 'a>> = Vec::new();
        if self.sources.contains(&MetricSource::Pmd) {
            externals.push(Box::new(PmdRunner::new(&ctx.config.pmd, ctx.runner)));
        }
        if self.sources.contains(&MetricSource::Readability) {
            externals.push(Box::new(ReadabilityRetriever::new(
                &ctx.config.readability,
                ctx.runner,
            )));
        }
        externals
    }

    /// Score one file with every selected source.
    fn score_file(
        &self,
        ctx: &AnalysisContext<'_>,
        path: &Path,
        policies: &[(PolicyKind, Policy)],
        externals: &[Box<dyn ExternalAnalyzer + '_>],
    ) -> Option<FileScores> {
        let source = SourceFile::load(path)
            .map_err(|e| tracing::warn!("Skipping {}: {e}", path.display()))
            .ok()?;
        let tree = ctx
            .provider
            .parse_source(&source)
            .map_err(|e| tracing::warn!("Skipping {}: {e}", path.display()))
            .ok()?;
        if tree.has_error {
            tracing::debug!("{} has syntax errors; scores are best-effort", path.display());
        }

        let traversal: Traversal = ctx.config.engine.traversal;
        let mut values = BTreeMap::new();
        let mut methods: BTreeMap<(usize, String), MethodRow> = BTreeMap::new();

        for (kind, policy) in policies {
            let score = engine::score_tree(&tree, policy, traversal);
            values.insert(kind.metric(), score as f64);

            if *kind == PolicyKind::Cyclomatic {
                if let Some(mi) = maintainability_index(
                    tree.lines_of_code(),
                    tree.comment_lines(),
                    score as f64,
                ) {
                    values.insert(Metric::Maintainability, mi);
                }
            }

            if self.by_method {
                for MethodScore {
                    name,
                    start_line,
                    end_line,
                    score,
                } in engine::method_scores(&tree, policy, traversal)
                {
                    methods
                        .entry((start_line, name.clone()))
                        .or_insert_with(|| MethodRow {
                            name,
                            start_line,
                            end_line,
                            values: BTreeMap::new(),
                        })
                        .values
                        .insert(kind.metric(), score);
                }
            }
        }

        for external in externals {
            let measurements = external.measure(path);
            if measurements.is_empty() {
                tracing::debug!("{} reported nothing for {}", external.name(), path.display());
            }
            for measurement in measurements {
                if external.metrics().contains(&measurement.metric) {
                    values.insert(measurement.metric, measurement.value);
                } else {
                    tracing::warn!(
                        "Ignoring {} value from {} for {}",
                        measurement.metric,
                        external.name(),
                        path.display()
                    );
                }
            }
        }

        let loc = tree.lines_of_code();
        Some(FileScores {
            key: GroupKey(ctx.key_components(path)),
            file: ctx.files.relative_path(path).display().to_string(),
            syntax_ok: !tree.has_error,
            loc,
            method_count: tree
                .root
                .descendants()
                .filter(|node| node.kind == NodeKind::MethodDeclaration)
                .count(),
            comment_density: comment_density(loc, tree.comment_lines()),
            values,
            methods: methods.into_values().collect(),
        })
    }
}

impl AnalyzerTrait for Analyzer {
    type Output = Analysis;

    fn name(&self) -> &'static str {
        "score"
    }

    fn description(&self) -> &'static str {
        "Score Java files with cognitive, test-aware and cyclomatic policies and aggregate per group"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output> {
        let start = Instant::now();
        let total_files = ctx.files.len();
        let counter = AtomicUsize::new(0);
        let key_len = ctx.config.grouping.labels.len();
        let metrics = self.metrics();
        let policies = self.policies();
        let externals = self.externals(ctx);
        if !externals.is_empty() {
            let names: Vec<&str> = externals.iter().map(|e| e.name()).collect();
            tracing::info!("External analyzers: {}", names.join(", "));
        }

        let (mut files, aggregator) = ctx
            .files
            .files()
            .par_iter()
            .fold(
                || (Vec::new(), Aggregator::new(key_len)),
                |(mut files, mut aggregator), path| {
                    if let Some(scores) = self.score_file(ctx, path, &policies, &externals) {
                        for metric in &metrics {
                            aggregator.declare(&scores.key, *metric);
                        }
                        for (metric, value) in &scores.values {
                            aggregator.add(MetricRecord::new(scores.key.clone(), *metric, *value));
                        }
                        files.push(scores);
                    }

                    let current = counter.fetch_add(1, Ordering::Relaxed) + 1;
                    ctx.report_progress(current, total_files);

                    (files, aggregator)
                },
            )
            .reduce(
                || (Vec::new(), Aggregator::new(key_len)),
                |(mut files, mut aggregator), (other_files, other)| {
                    files.extend(other_files);
                    aggregator.merge(other);
                    (files, aggregator)
                },
            );

        files.sort_by(|a, b| a.file.cmp(&b.file));

        let analysis = Analysis {
            labels: ctx.config.grouping.labels.clone(),
            metrics,
            by_method: self.by_method,
            summary: aggregator.summaries(),
            skipped_records: aggregator.skipped(),
            files,
        };

        tracing::info!(
            "Scoring completed in {:?}: {} of {} files, {} groups, {} records skipped",
            start.elapsed(),
            analysis.files.len(),
            total_files,
            analysis.summary.len(),
            analysis.skipped_records
        );

        Ok(analysis)
    }
}

/// Full scoring result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Grouping key column names.
    pub labels: Vec<String>,
    /// Metrics that were requested.
    pub metrics: Vec<Metric>,
    /// Whether per-method rows were computed.
    pub by_method: bool,
    /// Per-file results, sorted by path.
    pub files: Vec<FileScores>,
    /// Grouped statistics.
    pub summary: Vec<SummaryRow>,
    /// Records dropped by the aggregator.
    pub skipped_records: usize,
}

/// Scores of one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileScores {
    pub key: GroupKey,
    /// Path relative to the analyzed root.
    pub file: String,
    /// Whether the file parsed without errors.
    pub syntax_ok: bool,
    /// Non-blank lines.
    pub loc: usize,
    /// Method declarations in the file.
    pub method_count: usize,
    /// Comment lines per non-blank line; `None` for empty files.
    pub comment_density: Option<f64>,
    /// Available metric values; missing entries are unavailable.
    pub values: BTreeMap<Metric, f64>,
    /// Per-method engine scores, when requested.
    pub methods: Vec<MethodRow>,
}

/// Engine scores of one method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodRow {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub values: BTreeMap<Metric, u32>,
}

impl Analysis {
    /// Render as summary and detailed tables.
    pub fn to_report(&self) -> Report {
        let detailed = if self.by_method {
            self.method_rows()
        } else {
            self.file_rows()
        };
        Report {
            command: "score".to_string(),
            files_analyzed: self.files.len(),
            skipped_records: self.skipped_records,
            summary: report::summary_rows(&self.labels, &self.summary),
            detailed,
        }
    }

    fn file_rows(&self) -> Vec<report::Row> {
        self.files
            .iter()
            .map(|file| {
                let mut row = report::key_columns(&self.labels, file.key.labels());
                row.insert("file".to_string(), Value::from(file.file.clone()));
                row.insert("loc".to_string(), Value::from(file.loc));
                row.insert("methods".to_string(), Value::from(file.method_count));
                row.insert(
                    "comment_density".to_string(),
                    report::optional(file.comment_density),
                );
                for metric in &self.metrics {
                    row.insert(
                        metric.to_string(),
                        report::optional(file.values.get(metric).copied()),
                    );
                }
                row.insert("syntax_ok".to_string(), Value::from(file.syntax_ok));
                row
            })
            .collect()
    }

    fn method_rows(&self) -> Vec<report::Row> {
        let engine_metrics: Vec<Metric> = PolicyKind::ALL
            .iter()
            .map(|k| k.metric())
            .filter(|m| self.metrics.contains(m))
            .collect();

        self.files
            .iter()
            .flat_map(|file| {
                file.methods.iter().map(|method| {
                    let mut row = report::key_columns(&self.labels, file.key.labels());
                    row.insert("file".to_string(), Value::from(file.file.clone()));
                    row.insert("method".to_string(), Value::from(method.name.clone()));
                    row.insert("line".to_string(), Value::from(method.start_line));
                    for metric in &engine_metrics {
                        let value = method
                            .values
                            .get(metric)
                            .map_or(Value::Null, |v| Value::from(*v));
                        row.insert(metric.to_string(), value);
                    }
                    row.insert("syntax_ok".to_string(), Value::from(file.syntax_ok));
                    row
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::FileSet;
    use crate::external::testing::FakeRunner;
    use crate::external::ProcessRunner;
    use crate::tree::JavaTreeProvider;

    const FOO_TEST: &str = r#"
import org.junit.jupiter.api.Test;

class FooTest {
    @Test
    void testOne() {
        if (x > 0) {
            assertTrue(x > 0);
        }
    }

    @Test
    void testLoop() {
        for (int i = 0; i < 3; i++) {
            if (i == 1) {
                fail();
            }
        }
    }
}
"#;

    const BAR_TEST: &str = r#"
class BarTest {
    void plain() {
        int a = 1;
        int b = a + 2;
    }
}
"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn dataset() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "sf110/gpt/proj/FooTest.java", FOO_TEST);
        write(temp.path(), "sf110/gpt/proj/BarTest.java", BAR_TEST);
        write(temp.path(), "sf110/mistral/proj/BarTest.java", BAR_TEST);
        temp
    }

    fn run(analyzer: &Analyzer, root: &Path) -> Analysis {
        let config = Config::default();
        let files = FileSet::from_path(root, &config).unwrap();
        let provider = JavaTreeProvider::new().unwrap();
        let ctx = AnalysisContext::new(&files, &config, &provider, &ProcessRunner);
        analyzer.analyze(&ctx).unwrap()
    }

    fn file<'a>(analysis: &'a Analysis, suffix: &str) -> &'a FileScores {
        analysis
            .files
            .iter()
            .find(|f| f.file.ends_with(suffix) && f.file.contains("gpt"))
            .unwrap()
    }

    #[test]
    fn test_scores_structural_and_test_aware() {
        let temp = dataset();
        let analysis = run(&Analyzer::default(), temp.path());
        assert_eq!(analysis.files.len(), 3);

        let foo = file(&analysis, "FooTest.java");
        assert!(foo.syntax_ok);
        assert_eq!(foo.key, GroupKey::new(["sf110", "gpt", "proj"]));
        // testOne: if = 1; testLoop: for = 1, nested if = 2.
        assert_eq!(foo.values[&Metric::Cognitive], 4.0);
        // + 2 @Test, assertTrue, fail
        assert_eq!(foo.values[&Metric::TestAware], 8.0);
        // two ifs, one for
        assert_eq!(foo.values[&Metric::Cyclomatic], 3.0);
        assert!(foo.values.contains_key(&Metric::Maintainability));

        let bar = file(&analysis, "BarTest.java");
        assert_eq!(bar.values[&Metric::Cognitive], 0.0);
        assert_eq!(bar.values[&Metric::TestAware], 0.0);
    }

    #[test]
    fn test_file_rows_carry_size_columns() {
        let temp = dataset();
        let analysis = run(&Analyzer::default(), temp.path());

        let foo = file(&analysis, "FooTest.java");
        assert_eq!(foo.loc, 17);
        assert_eq!(foo.method_count, 2);
        assert_eq!(foo.comment_density, Some(0.0));
        // No comments at all.
        assert_eq!(foo.values[&Metric::Maintainability], 0.0);

        let report = analysis.to_report();
        let bar = report
            .detailed
            .iter()
            .find(|r| r["file"] == Value::from("sf110/gpt/proj/BarTest.java"))
            .unwrap();
        let columns: Vec<&str> = bar.keys().map(String::as_str).collect();
        assert_eq!(
            &columns[..7],
            &["dataset", "model", "project", "file", "loc", "methods", "comment_density"]
        );
        assert_eq!(bar["loc"], Value::from(6));
        assert_eq!(bar["methods"], Value::from(1));
        assert_eq!(bar["comment_density"], report::number(0.0));
    }

    struct Misreporting;

    impl ExternalAnalyzer for Misreporting {
        fn name(&self) -> &'static str {
            "misreporting"
        }

        fn metrics(&self) -> &'static [Metric] {
            &[Metric::Readability]
        }

        fn measure(&self, _file: &Path) -> Vec<crate::external::Measurement> {
            vec![
                crate::external::Measurement::new(Metric::Readability, 0.5),
                crate::external::Measurement::new(Metric::Cognitive, 99.0),
            ]
        }
    }

    #[test]
    fn test_undeclared_external_metrics_are_ignored() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "d/m/p/ATest.java", BAR_TEST);
        let config = Config::default();
        let files = FileSet::from_path(temp.path(), &config).unwrap();
        let provider = JavaTreeProvider::new().unwrap();
        let ctx = AnalysisContext::new(&files, &config, &provider, &ProcessRunner);

        let externals: Vec<Box<dyn ExternalAnalyzer>> = vec![Box::new(Misreporting)];
        let scores = Analyzer::new(vec![MetricSource::Readability])
            .score_file(&ctx, &files.files()[0], &[], &externals)
            .unwrap();
        assert_eq!(scores.values.len(), 1);
        assert_eq!(scores.values[&Metric::Readability], 0.5);
    }

    #[test]
    fn test_summary_groups() {
        let temp = dataset();
        let analysis = run(&Analyzer::new(vec![MetricSource::Cognitive]), temp.path());
        assert_eq!(analysis.summary.len(), 2);

        let gpt = &analysis.summary[0];
        assert_eq!(gpt.key, GroupKey::new(["sf110", "gpt", "proj"]));
        let summary = gpt.summary.unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 4.0);
        assert_eq!(summary.median, 2.0);

        let mistral = analysis.summary[1].summary.unwrap();
        assert_eq!(mistral.count, 1);
        assert_eq!(mistral.mean, 0.0);
    }

    #[test]
    fn test_by_method_rows() {
        let temp = dataset();
        let analysis = run(
            &Analyzer::new(vec![MetricSource::Cognitive]).by_method(true),
            temp.path(),
        );
        let report = analysis.to_report();
        let foo_rows: Vec<_> = report
            .detailed
            .iter()
            .filter(|r| r["file"].as_str().unwrap().ends_with("FooTest.java"))
            .collect();
        assert_eq!(foo_rows.len(), 2);
        assert_eq!(foo_rows[0]["method"], Value::from("testOne"));
        assert_eq!(foo_rows[0]["cognitive"], Value::from(1));
        assert_eq!(foo_rows[1]["method"], Value::from("testLoop"));
        assert_eq!(foo_rows[1]["cognitive"], Value::from(3));
    }

    #[test]
    fn test_shallow_files_are_skipped_from_summary() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "d/m/p/ATest.java", BAR_TEST);
        write(temp.path(), "d/BTest.java", BAR_TEST);
        let analysis = run(&Analyzer::new(vec![MetricSource::Cognitive]), temp.path());
        assert_eq!(analysis.files.len(), 2);
        assert_eq!(analysis.skipped_records, 1);
        assert_eq!(analysis.summary.len(), 1);

        let report = analysis.to_report();
        let shallow = report
            .detailed
            .iter()
            .find(|r| r["file"] == Value::from("d/BTest.java"))
            .unwrap();
        assert_eq!(shallow["model"], Value::Null);
    }

    #[test]
    fn test_readability_unavailable_reports_no_data() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "d/m/p/ATest.java", BAR_TEST);
        let config = Config::default();
        let files = FileSet::from_path(temp.path(), &config).unwrap();
        let provider = JavaTreeProvider::new().unwrap();
        let fake = FakeRunner::with_output(1, "");
        let ctx = AnalysisContext::new(&files, &config, &provider, &fake);

        let analysis = Analyzer::new(vec![MetricSource::Readability])
            .analyze(&ctx)
            .unwrap();
        assert!(analysis.files[0].values.is_empty());
        assert_eq!(analysis.summary.len(), 1);
        assert_eq!(analysis.summary[0].metric, Metric::Readability);
        assert_eq!(analysis.summary[0].summary, None);

        let report = analysis.to_report();
        assert_eq!(report.detailed[0]["readability"], Value::Null);
    }

    #[test]
    fn test_external_scores_are_recorded() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "d/m/p/ATest.java", BAR_TEST);
        let config = Config::default();
        let files = FileSet::from_path(temp.path(), &config).unwrap();
        let provider = JavaTreeProvider::new().unwrap();
        let fake = FakeRunner::with_output(0, "ATest.java\t0.42\n");
        let ctx = AnalysisContext::new(&files, &config, &provider, &fake);

        let analysis = Analyzer::new(vec![MetricSource::Cognitive, MetricSource::Readability])
            .analyze(&ctx)
            .unwrap();
        assert_eq!(analysis.files[0].values[&Metric::Readability], 0.42);
        assert_eq!(analysis.metrics, vec![Metric::Cognitive, Metric::Readability]);
    }

    #[test]
    fn test_maintainability_index() {
        assert_eq!(maintainability_index(0, 0, 3.0), None);
        let mi = maintainability_index(10, 1, 0.0).unwrap();
        // 171 - 5.2 ln 10 - 16.2 ln 0.1 exceeds 171, so it clamps.
        assert_eq!(mi, 100.0);
        let busy = maintainability_index(400, 200, 60.0).unwrap();
        assert!(busy > 0.0 && busy < 100.0);
        assert_eq!(maintainability_index(1_000_000, 1, 1e6), Some(0.0));
    }

    #[test]
    fn test_maintainability_index_without_comments_is_zero() {
        assert_eq!(maintainability_index(10, 0, 0.0), Some(0.0));
        assert_eq!(maintainability_index(250, 0, 12.0), Some(0.0));
        // A single comment line lifts the same file off the floor.
        assert!(maintainability_index(250, 1, 12.0).unwrap() > 0.0);
    }

    #[test]
    fn test_comment_density() {
        assert_eq!(comment_density(0, 0), None);
        assert_eq!(comment_density(8, 2), Some(0.25));
        assert_eq!(comment_density(5, 0), Some(0.0));
    }

    #[test]
    fn test_duplicate_sources_are_ignored() {
        let analyzer = Analyzer::new(vec![
            MetricSource::Cyclomatic,
            MetricSource::Cyclomatic,
            MetricSource::Pmd,
        ]);
        assert_eq!(
            analyzer.metrics(),
            vec![
                Metric::Cyclomatic,
                Metric::Maintainability,
                Metric::PmdCognitive,
                Metric::PmdCyclomatic
            ]
        );
    }
}
