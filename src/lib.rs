//! cxlens - Cognitive complexity scoring for generated Java test suites.
//!
//! cxlens walks Java syntax trees and scores them under rule policies kept
//! as data: structural cognitive complexity, a test-aware variant that also
//! weighs test-framework idioms, and cyclomatic complexity. Scores from
//! PMD and an external readability model can be pulled in alongside, and
//! every metric is aggregated per group of files (dataset, model, project)
//! with count, mean, median, min, max and total.
//!
//! # Example
//!
//! ```no_run
//! use cxlens::analyzers::complexity::{Analyzer as ScoreAnalyzer, MetricSource};
//! use cxlens::config::Config;
//! use cxlens::core::{AnalysisContext, Analyzer, FileSet};
//! use cxlens::external::ProcessRunner;
//! use cxlens::tree::JavaTreeProvider;
//!
//! let config = Config::default();
//! let files = FileSet::from_path("generated-tests", &config).unwrap();
//! let provider = JavaTreeProvider::new().unwrap();
//! let ctx = AnalysisContext::new(&files, &config, &provider, &ProcessRunner);
//! let analyzer = ScoreAnalyzer::new(MetricSource::DEFAULT.to_vec());
//! let result = analyzer.analyze(&ctx).unwrap();
//! for row in &result.summary {
//!     println!("{} {}: {:?}", row.key, row.metric, row.summary);
//! }
//! ```

pub mod aggregate;
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod external;
pub mod output;
pub mod report;
pub mod tree;

pub use core::{AnalysisContext, Analyzer, Error, Result};
