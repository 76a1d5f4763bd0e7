//! PMD report import.
//!
//! PMD reports complexity as free text (`The method 'f()' has a cognitive
//! complexity of 17, current threshold is 15`). The importer pulls the number
//! out of each violation message using one template per rule and sums the
//! values per (file, rule). Both the XML and the JSON renderers are accepted.

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;
use serde::Deserialize;

use super::{CommandRunner, ExternalAnalyzer, Measurement};
use crate::aggregate::Metric;
use crate::config::PmdConfig;
use crate::core::{Error, Result};

/// Exit code PMD uses when it ran fine and found violations.
const EXIT_VIOLATIONS_FOUND: i32 = 4;

const PMD_METRICS: &[Metric] = &[Metric::PmdCognitive, Metric::PmdCyclomatic];

static RULE_TEMPLATES: Lazy<Vec<(&'static str, Metric, Regex)>> = Lazy::new(|| {
    [
        ("CognitiveComplexity", Metric::PmdCognitive, r"cognitive complexity of (\d+)"),
        ("CyclomaticComplexity", Metric::PmdCyclomatic, r"cyclomatic complexity of (\d+)"),
    ]
    .into_iter()
    .filter_map(|(rule, metric, pattern)| Regex::new(pattern).ok().map(|re| (rule, metric, re)))
    .collect()
});

/// Metric a PMD rule is imported as.
pub fn rule_metric(rule: &str) -> Option<Metric> {
    RULE_TEMPLATES
        .iter()
        .find(|(name, _, _)| *name == rule)
        .map(|(_, metric, _)| *metric)
}

/// Extract the complexity value from a violation message.
///
/// Returns `None` for unsupported rules and messages that do not match the
/// rule's template. When the template matches more than once the last match
/// wins.
pub fn extract_score(rule: &str, message: &str) -> Option<u64> {
    let (_, _, pattern) = RULE_TEMPLATES.iter().find(|(name, _, _)| *name == rule)?;
    pattern
        .captures_iter(message)
        .last()
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Complexity values summed per file and rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PmdReport {
    files: BTreeMap<String, BTreeMap<String, u64>>,
}

impl PmdReport {
    /// Parse an XML or JSON report.
    ///
    /// A malformed document yields an empty report; the problem is logged.
    pub fn parse(text: &str) -> Self {
        let parsed = if text.trim_start().starts_with('{') {
            Self::parse_json(text)
        } else {
            Self::parse_xml(text)
        };
        match parsed {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Ignoring malformed PMD report: {e}");
                Self::default()
            }
        }
    }

    /// Read and parse a report file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    fn add(&mut self, file: &str, rule: &str, message: &str) {
        let Some(value) = extract_score(rule, message) else {
            tracing::debug!(file, rule, "Skipping violation without a complexity value");
            return;
        };
        let slot = self
            .files
            .entry(file.to_string())
            .or_default()
            .entry(rule.to_string())
            .or_default();
        *slot = slot.saturating_add(value);
    }

    fn parse_xml(text: &str) -> Result<Self> {
        let mut report = Self::default();
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        let mut file: Option<String> = None;
        let mut violation: Option<(String, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    match e.local_name().as_ref() {
                        b"file" => file = attribute(&e, b"name")?,
                        b"violation" => {
                            let rule = attribute(&e, b"rule")?.unwrap_or_default();
                            violation = Some((rule, String::new()));
                        }
                        _ => {}
                    }
                }
                Event::Text(t) => {
                    if let Some((_, message)) = violation.as_mut() {
                        message.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some((_, message)) = violation.as_mut() {
                        message.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    match e.local_name().as_ref() {
                        b"violation" => {
                            if let (Some(name), Some((rule, message))) = (&file, violation.take()) {
                                report.add(name, &rule, message.trim());
                            }
                        }
                        b"file" => file = None,
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(Error::Report("unexpected end of document".to_string()));
        }
        Ok(report)
    }

    fn parse_json(text: &str) -> Result<Self> {
        let document: JsonReport = serde_json::from_str(text)?;
        let mut report = Self::default();
        for file in document.files {
            for violation in file.violations {
                report.add(&file.filename, &violation.rule, &violation.description);
            }
        }
        Ok(report)
    }

    /// Whether no value was extracted.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files mentioned in the report.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Summed value of `rule` for `file`.
    pub fn score(&self, file: &str, rule: &str) -> Option<u64> {
        self.files.get(file).and_then(|rules| rules.get(rule)).copied()
    }

    /// Per-metric totals across every file in the report.
    pub fn measurements(&self) -> Vec<Measurement> {
        let mut totals: BTreeMap<Metric, u64> = BTreeMap::new();
        for rules in self.files.values() {
            for (rule, value) in rules {
                if let Some(metric) = rule_metric(rule) {
                    let slot = totals.entry(metric).or_default();
                    *slot = slot.saturating_add(*value);
                }
            }
        }
        totals
            .into_iter()
            .map(|(metric, value)| Measurement::new(metric, value as f64))
            .collect()
    }
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

#[derive(Deserialize)]
struct JsonReport {
    #[serde(default)]
    files: Vec<JsonFile>,
}

#[derive(Deserialize)]
struct JsonFile {
    filename: String,
    #[serde(default)]
    violations: Vec<JsonViolation>,
}

#[derive(Deserialize)]
struct JsonViolation {
    rule: String,
    #[serde(default)]
    description: String,
}

/// Runs PMD on single files and imports its XML output.
pub struct PmdRunner<'a> {
    config: &'a PmdConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> PmdRunner<'a> {
    pub fn new(config: &'a PmdConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    fn args(&self, file: &Path) -> Vec<String> {
        let mut args = self.config.args.clone();
        args.extend([
            "check".to_string(),
            "-f".to_string(),
            "xml".to_string(),
            "-R".to_string(),
            self.config.rulesets.join(","),
            "-d".to_string(),
            file.display().to_string(),
        ]);
        args
    }
}

impl ExternalAnalyzer for PmdRunner<'_> {
    fn name(&self) -> &'static str {
        "pmd"
    }

    fn metrics(&self) -> &'static [Metric] {
        PMD_METRICS
    }

    fn measure(&self, file: &Path) -> Vec<Measurement> {
        let output = match self.runner.run(&self.config.program, &self.args(file), None) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(file = %file.display(), "{e}");
                return Vec::new();
            }
        };
        if !output.success() && output.status != Some(EXIT_VIOLATIONS_FOUND) {
            tracing::warn!(
                file = %file.display(),
                status = ?output.status,
                stderr = output.stderr.trim(),
                "PMD failed"
            );
            return Vec::new();
        }
        PmdReport::parse(&output.stdout).measurements()
    }
}
