//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::analyzers::complexity::MetricSource;
use crate::config;
use crate::output::Format;

/// cxlens - Cognitive complexity scoring for generated Java tests.
#[derive(Parser)]
#[command(name = "cxlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root of the dataset to analyze
    #[arg(short, long, default_value = ".", global = true)]
    pub path: PathBuf,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short = 'j', long, global = true)]
    pub jobs: Option<usize>,

    /// Also write `<command>_detailed.csv` and `<command>_summary.csv` here
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score Java sources and aggregate per group
    Score(ScoreArgs),

    /// Import saved PMD reports and aggregate per group
    Import(ImportArgs),

    /// Check which sources parse and count their methods
    Syntax,
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Metrics to compute
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_value = "cognitive,test-aware,cyclomatic"
    )]
    pub metrics: Vec<MetricArg>,

    /// Report one detailed row per method instead of per file
    #[arg(long)]
    pub by_method: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Directory of PMD reports (XML or JSON)
    pub reports: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    Cognitive,
    TestAware,
    Cyclomatic,
    Pmd,
    Readability,
}

impl From<MetricArg> for MetricSource {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Cognitive => MetricSource::Cognitive,
            MetricArg::TestAware => MetricSource::TestAware,
            MetricArg::Cyclomatic => MetricSource::Cyclomatic,
            MetricArg::Pmd => MetricSource::Pmd,
            MetricArg::Readability => MetricSource::Readability,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
    Csv,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Markdown => Format::Markdown,
            OutputFormat::Text => Format::Text,
            OutputFormat::Csv => Format::Csv,
        }
    }
}

impl From<config::OutputFormat> for Format {
    fn from(format: config::OutputFormat) -> Self {
        match format {
            config::OutputFormat::Json => Format::Json,
            config::OutputFormat::Markdown => Format::Markdown,
            config::OutputFormat::Text => Format::Text,
            config::OutputFormat::Csv => Format::Csv,
        }
    }
}

impl Cli {
    /// Output format: the flag wins over the configured default.
    pub fn output_format(&self, config: &config::Config) -> Format {
        self.format
            .map(Format::from)
            .unwrap_or_else(|| config.output.format.into())
    }
}
