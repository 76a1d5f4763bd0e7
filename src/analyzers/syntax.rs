//! Syntax analysis of generated test sources.
//!
//! Reports per file whether the source parsed cleanly, how many methods it
//! declares and where the parser found errors; per group, how many files
//! parsed and the success rate.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::GroupKey;
use crate::core::{AnalysisContext, Analyzer as AnalyzerTrait, Result, SourceFile};
use crate::report::{self, Report, Row};
use crate::tree::{NodeKind, SyntaxErrorSite, SyntaxTree};

/// Syntax analysis pipeline.
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
        "syntax"
    }

    fn description(&self) -> &'static str {
        "Check that sources parse and count their methods"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output> {
        let start = Instant::now();
        let total = ctx.files.len();
        let counter = AtomicUsize::new(0);
        let key_len = ctx.config.grouping.labels.len();

        let (mut files, groups) = ctx
            .files
            .files()
            .par_iter()
            .fold(
                || (Vec::new(), SyntaxGroups::default()),
                |(mut files, mut groups), path| {
                    let parsed = SourceFile::load(path)
                        .and_then(|source| ctx.provider.parse_source(&source));
                    match parsed {
                        Ok(tree) => {
                            let key = GroupKey(ctx.key_components(path));
                            let checked = FileSyntax::from_tree(
                                key,
                                ctx.files.relative_path(path).display().to_string(),
                                &tree,
                            );
                            groups.record(&checked, key_len);
                            files.push(checked);
                        }
                        Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
                    }

                    let current = counter.fetch_add(1, Ordering::Relaxed) + 1;
                    ctx.report_progress(current, total);

                    (files, groups)
                },
            )
            .reduce(
                || (Vec::new(), SyntaxGroups::default()),
                |(mut files, mut groups), (other_files, other)| {
                    files.extend(other_files);
                    groups.merge(other);
                    (files, groups)
                },
            );

        files.sort_by(|a, b| a.file.cmp(&b.file));

        let analysis = Analysis {
            labels: ctx.config.grouping.labels.clone(),
            skipped_records: groups.skipped,
            summary: groups.into_rows(),
            files,
        };

        tracing::info!(
            "Syntax analysis completed in {:?}: {} files, {} with errors",
            start.elapsed(),
            analysis.files.len(),
            analysis.files.iter().filter(|f| !f.syntax_ok).count()
        );

        Ok(analysis)
    }
}

/// Syntax facts of one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSyntax {
    pub key: GroupKey,
    pub file: String,
    pub syntax_ok: bool,
    /// Method declarations (constructors excluded).
    pub methods: usize,
    /// Lines spanned by those methods.
    pub method_lines: usize,
    pub errors: Vec<SyntaxErrorSite>,
}

impl FileSyntax {
    pub fn from_tree(key: GroupKey, file: String, tree: &SyntaxTree) -> Self {
        let (methods, method_lines) = tree
            .root
            .descendants()
            .filter(|node| node.kind == NodeKind::MethodDeclaration)
            .fold((0, 0), |(count, lines), node| {
                (count + 1, lines + node.end_row.saturating_sub(node.start_row) + 1)
            });

        Self {
            key,
            file,
            syntax_ok: !tree.has_error,
            methods,
            method_lines,
            errors: tree.errors.clone(),
        }
    }

    /// Error sites as `kind@row:col-row:col`, one-indexed, separated by `; `.
    pub fn error_locations(&self) -> String {
        self.errors
            .iter()
            .map(|site| {
                format!(
                    "{}@{}:{}-{}:{}",
                    site.kind,
                    site.start.0 + 1,
                    site.start.1 + 1,
                    site.end.0 + 1,
                    site.end.1 + 1
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Parse outcome counts for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSyntax {
    pub total: usize,
    pub correct: usize,
}

impl GroupSyntax {
    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    /// Percentage of files that parsed cleanly; `None` for an empty group.
    pub fn success_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 * 100.0 / self.total as f64)
    }
}

#[derive(Debug, Default)]
struct SyntaxGroups {
    groups: BTreeMap<GroupKey, GroupSyntax>,
    skipped: usize,
}

impl SyntaxGroups {
    fn record(&mut self, file: &FileSyntax, key_len: usize) {
        if file.key.len() != key_len {
            tracing::warn!(
                key = %file.key,
                expected = key_len,
                "Skipping {} with mismatched grouping key",
                file.file
            );
            self.skipped += 1;
            return;
        }
        let group = self.groups.entry(file.key.clone()).or_default();
        group.total += 1;
        if file.syntax_ok {
            group.correct += 1;
        }
    }

    fn merge(&mut self, other: SyntaxGroups) {
        self.skipped += other.skipped;
        for (key, counts) in other.groups {
            let group = self.groups.entry(key).or_default();
            group.total += counts.total;
            group.correct += counts.correct;
        }
    }

    fn into_rows(self) -> Vec<(GroupKey, GroupSyntax)> {
        self.groups.into_iter().collect()
    }
}

/// Full syntax analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub labels: Vec<String>,
    pub files: Vec<FileSyntax>,
    pub summary: Vec<(GroupKey, GroupSyntax)>,
    pub skipped_records: usize,
}

impl Analysis {
    /// Render as summary and detailed tables.
    pub fn to_report(&self) -> Report {
        let summary = self
            .summary
            .iter()
            .map(|(key, group)| {
                let mut row = report::key_columns(&self.labels, key.labels());
                row.insert("total".to_string(), Value::from(group.total));
                row.insert("correct".to_string(), Value::from(group.correct));
                row.insert("incorrect".to_string(), Value::from(group.incorrect()));
                row.insert(
                    "success_rate".to_string(),
                    report::optional(group.success_rate()),
                );
                row
            })
            .collect();

        let detailed = self.files.iter().map(|file| self.file_row(file)).collect();

        Report {
            command: "syntax".to_string(),
            files_analyzed: self.files.len(),
            skipped_records: self.skipped_records,
            summary,
            detailed,
        }
    }

    fn file_row(&self, file: &FileSyntax) -> Row {
        let mut row = report::key_columns(&self.labels, file.key.labels());
        row.insert("file".to_string(), Value::from(file.file.clone()));
        row.insert("syntax_ok".to_string(), Value::from(file.syntax_ok));
        row.insert("methods".to_string(), Value::from(file.methods));
        row.insert("method_lines".to_string(), Value::from(file.method_lines));
        row.insert("error_count".to_string(), Value::from(file.errors.len()));
        row.insert("errors".to_string(), Value::from(file.error_locations()));
        row
    }
}
