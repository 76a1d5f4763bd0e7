//! File set for collecting files to analyze.

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use super::{Error, Result};
use crate::config::Config;

/// A set of files with given extensions under a root, respecting .gitignore.
#[derive(Debug, Clone)]
pub struct FileSet {
    /// Root directory.
    root: PathBuf,
    /// All files in the set, sorted.
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Collect Java sources under `path`, honoring the configured excludes.
    pub fn from_path(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        Self::with_extensions(path, &["java"], &config.exclude_patterns)
    }

    /// Collect files with one of `extensions` under `path`, skipping `exclude_patterns`.
    pub fn with_extensions(
        path: impl AsRef<Path>,
        extensions: &[&str],
        exclude_patterns: &[String],
    ) -> Result<Self> {
        let root = path.as_ref().canonicalize()?;
        let excludes = build_globset(exclude_patterns)?;
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker.flatten() {
            let path = entry.path();

            // Skip directories
            if path.is_dir() {
                continue;
            }

            let matches_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e));
            if !matches_extension {
                continue;
            }

            let relative = path.strip_prefix(&root).unwrap_or(path);
            if excludes.is_match(relative) || excludes.is_match(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        // Sort for deterministic ordering
        files.sort();

        Ok(Self { root, files })
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all files in the set.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Get relative path from root.
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|_| path.to_path_buf())
    }

    /// Leading directory components of a file's relative path.
    ///
    /// Returns fewer than `n` labels when the file sits less than `n`
    /// directories below the root.
    pub fn key_components(&self, path: &Path, n: usize) -> Vec<String> {
        let relative = self.relative_path(path);
        let dirs = relative.parent().unwrap_or_else(|| Path::new(""));
        dirs.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .take(n)
            .collect()
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| Error::config(format!("invalid exclude pattern `{pattern}`: {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::config(format!("invalid exclude patterns: {e}")))
}
