//! Grouped, order-independent aggregation of metric records.
//!
//! Records are bucketed by (grouping key, metric). Buckets merge
//! associatively and commutatively, so workers can aggregate privately and
//! combine their partial results in any order.

pub mod stats;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use stats::SortedValues;

/// Named metric carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Structural cognitive complexity.
    Cognitive,
    /// Cognitive complexity with test-framework weights.
    TestAware,
    /// Decision-point count.
    Cyclomatic,
    /// PMD's CognitiveComplexity rule.
    PmdCognitive,
    /// PMD's CyclomaticComplexity rule.
    PmdCyclomatic,
    /// External readability model score.
    Readability,
    /// Normalized maintainability index.
    Maintainability,
}

impl Metric {
    /// Column / row label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cognitive => "cognitive",
            Self::TestAware => "test_aware",
            Self::Cyclomatic => "cyclomatic",
            Self::PmdCognitive => "pmd_cognitive",
            Self::PmdCyclomatic => "pmd_cyclomatic",
            Self::Readability => "readability",
            Self::Maintainability => "maintainability",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered label sequence identifying a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(pub Vec<String>);

impl GroupKey {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// One observation produced by the engine, importer or retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub key: GroupKey,
    pub metric: Metric,
    pub value: f64,
}

impl MetricRecord {
    pub fn new(key: GroupKey, metric: Metric, value: f64) -> Self {
        Self { key, metric, value }
    }
}

/// Values collected for one (key, metric) pair.
///
/// Statistics are only computed in [`Bucket::finalize`], from the sorted
/// values, so a bucket built by merging partial buckets in any order
/// finalizes to exactly the same summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bucket {
    values: Vec<f64>,
}

impl Bucket {
    /// Add one value.
    pub fn record(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Fold another bucket into this one.
    pub fn merge(&mut self, other: Bucket) {
        self.values.extend(other.values);
    }

    /// Number of recorded values.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Final statistics, or `None` when nothing was recorded.
    pub fn finalize(&self) -> Option<Summary> {
        let values = SortedValues::new(self.values.clone());
        Some(Summary {
            count: values.len(),
            mean: values.mean()?,
            min: values.min()?,
            max: values.max()?,
            median: values.median()?,
            total: values.total()?,
        })
    }
}

/// Finalized statistics of a non-empty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub total: f64,
}

/// One output row of the aggregate report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub key: GroupKey,
    pub metric: Metric,
    /// `None` means no data for this group and metric.
    pub summary: Option<Summary>,
}

/// Buckets keyed by (group, metric) with a fixed key length.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    key_len: usize,
    buckets: BTreeMap<(GroupKey, Metric), Bucket>,
    skipped: usize,
}

impl Aggregator {
    /// Create an aggregator whose records must all have `key_len` labels.
    pub fn new(key_len: usize) -> Self {
        Self {
            key_len,
            buckets: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Expected key length.
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Number of records rejected so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of (group, metric) buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Add a record. Records with the wrong key length or a non-finite value
    /// are skipped and counted; returns whether the record was accepted.
    pub fn add(&mut self, record: MetricRecord) -> bool {
        if record.key.len() != self.key_len {
            tracing::warn!(
                key = %record.key,
                expected = self.key_len,
                actual = record.key.len(),
                "Skipping record with mismatched grouping key"
            );
            self.skipped += 1;
            return false;
        }
        if !record.value.is_finite() {
            tracing::warn!(key = %record.key, metric = %record.metric, "Skipping non-finite value");
            self.skipped += 1;
            return false;
        }
        self.buckets
            .entry((record.key, record.metric))
            .or_default()
            .record(record.value);
        true
    }

    /// Make sure a (group, metric) row exists even if no value arrives, so
    /// the report shows "no data" instead of omitting the group.
    pub fn declare(&mut self, key: &GroupKey, metric: Metric) {
        if key.len() == self.key_len {
            self.buckets.entry((key.clone(), metric)).or_default();
        }
    }

    /// Fold another aggregator into this one.
    pub fn merge(&mut self, other: Aggregator) {
        self.skipped += other.skipped;
        for (slot, bucket) in other.buckets {
            self.buckets.entry(slot).or_default().merge(bucket);
        }
    }

    /// Finalized rows ordered by (key, metric).
    pub fn summaries(&self) -> Vec<SummaryRow> {
        self.buckets
            .iter()
            .map(|((key, metric), bucket)| SummaryRow {
                key: key.clone(),
                metric: *metric,
                summary: bucket.finalize(),
            })
            .collect()
    }
}
