//! External metric sources.
//!
//! Tools outside the process (PMD, the readability model) are reached through
//! a [`CommandRunner`], so tests can substitute canned output. Each tool is
//! wrapped in an [`ExternalAnalyzer`] that turns one file into zero or more
//! [`Measurement`]s. A failing tool yields no measurement, never a default
//! number.

pub mod pmd;
pub mod readability;

use std::path::Path;
use std::process::Command;

use crate::aggregate::Metric;
use crate::core::{Error, Result};

pub use pmd::{PmdReport, PmdRunner};
pub use readability::ReadabilityRetriever;

/// Captured result of one external process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Something that can run a program to completion.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, optionally in `cwd`, and capture its output.
    ///
    /// Errors only when the process cannot be started at all.
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> Result<ToolOutput>;
}

/// Runs real processes with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> Result<ToolOutput> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        tracing::debug!(program, ?args, "Running external tool");
        let output = command
            .output()
            .map_err(|e| Error::external_tool(program, e.to_string()))?;
        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One value reported by an external analyzer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub metric: Metric,
    pub value: f64,
}

impl Measurement {
    pub fn new(metric: Metric, value: f64) -> Self {
        Self { metric, value }
    }
}

/// An external source of per-file metrics.
pub trait ExternalAnalyzer: Send + Sync {
    /// Tool name for diagnostics.
    fn name(&self) -> &'static str;

    /// Metrics this analyzer can produce.
    fn metrics(&self) -> &'static [Metric];

    /// Measure one file. Unavailable values are simply absent.
    fn measure(&self, file: &Path) -> Vec<Measurement>;
}
