//! Analyzer trait and the per-run analysis context.

use std::path::Path;

use serde::Serialize;

use super::{FileSet, Result};
use crate::config::Config;
use crate::external::CommandRunner;
use crate::tree::TreeProvider;

/// Trait implemented by all batch pipelines.
pub trait Analyzer: Send + Sync {
    /// The result type produced by this analyzer.
    type Output: Serialize + Send;

    /// Unique identifier for this analyzer.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Run analysis and return results.
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output>;
}

/// Everything one analysis run needs, passed explicitly instead of globals.
pub struct AnalysisContext<'a> {
    /// Root directory being analyzed.
    pub root: &'a Path,
    /// Set of files to analyze.
    pub files: &'a FileSet,
    /// Configuration.
    pub config: &'a Config,
    /// Syntax tree provider.
    pub provider: &'a dyn TreeProvider,
    /// Runner for external tools.
    pub runner: &'a dyn CommandRunner,
    /// Progress callback.
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send + Sync + 'a>>,
}

impl<'a> AnalysisContext<'a> {
    /// Create a new analysis context.
    pub fn new(
        files: &'a FileSet,
        config: &'a Config,
        provider: &'a dyn TreeProvider,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            root: files.root(),
            files,
            config,
            provider,
            runner,
            on_progress: None,
        }
    }

    /// Add progress callback.
    pub fn with_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'a,
    {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Report progress if callback is set.
    pub fn report_progress(&self, current: usize, total: usize) {
        if let Some(ref f) = self.on_progress {
            f(current, total);
        }
    }

    /// Grouping key labels for a file, per the configured key length.
    pub fn key_components(&self, path: &Path) -> Vec<String> {
        self.files
            .key_components(path, self.config.grouping.labels.len())
    }
}
