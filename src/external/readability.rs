//! Readability score retrieval.
//!
//! The readability model is a separate program that takes one file path and
//! prints `<file>\t<score>` records, mixed with log lines.

use std::path::{Path, PathBuf};

use super::{CommandRunner, ExternalAnalyzer, Measurement};
use crate::aggregate::Metric;
use crate::config::ReadabilityConfig;

const READABILITY_METRICS: &[Metric] = &[Metric::Readability];

/// Find the score for `file_name` in the tool's output.
///
/// Lines without a tab or starting with an ignored prefix are not records.
/// A matching record whose score is not a finite number makes the result
/// unavailable.
pub fn parse_score(output: &str, file_name: &str, ignore_prefixes: &[String]) -> Option<f64> {
    let record = output
        .lines()
        .map(str::trim)
        .filter(|line| !ignore_prefixes.iter().any(|p| line.starts_with(p.as_str())))
        .filter_map(|line| line.split_once('\t'))
        .find(|(name, _)| base_name(name) == file_name)?;

    let (_, score) = record;
    let score = score.trim().parse::<f64>().ok()?;
    score.is_finite().then_some(score)
}

fn base_name(name: &str) -> &str {
    let name = name.trim();
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Invokes the readability model once per file.
pub struct ReadabilityRetriever<'a> {
    config: &'a ReadabilityConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> ReadabilityRetriever<'a> {
    pub fn new(config: &'a ReadabilityConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Score one file, or `None` when the tool fails or reports nothing usable.
    pub fn score(&self, file: &Path) -> Option<f64> {
        let path = absolute(file);
        let file_name = path.file_name()?.to_string_lossy().into_owned();

        let mut args = self.config.args.clone();
        args.push(path.display().to_string());

        let output = match self
            .runner
            .run(&self.config.program, &args, self.config.working_dir.as_deref())
        {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(file = %path.display(), "{e}");
                return None;
            }
        };
        if !output.success() {
            tracing::warn!(
                file = %path.display(),
                status = ?output.status,
                "Readability tool failed"
            );
            return None;
        }

        let score = parse_score(&output.stdout, &file_name, &self.config.ignore_prefixes);
        if score.is_none() {
            tracing::debug!(file = %path.display(), "No readability score in tool output");
        }
        score
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl ExternalAnalyzer for ReadabilityRetriever<'_> {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn metrics(&self) -> &'static [Metric] {
        READABILITY_METRICS
    }

    fn measure(&self, file: &Path) -> Vec<Measurement> {
        self.score(file)
            .map(|score| Measurement::new(Metric::Readability, score))
            .into_iter()
            .collect()
    }
}
