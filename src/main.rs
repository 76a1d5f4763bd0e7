//! cxlens CLI - Cognitive complexity scoring for generated Java tests.

use std::io::stdout;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cxlens::analyzers::complexity::MetricSource;
use cxlens::analyzers::{import, ImportAnalyzer, ScoreAnalyzer, SyntaxAnalyzer};
use cxlens::cli::{Cli, Command};
use cxlens::config::Config;
use cxlens::core::progress::ProgressTracker;
use cxlens::core::{AnalysisContext, Analyzer, Error, FileSet, Result};
use cxlens::external::ProcessRunner;
use cxlens::output::Format;
use cxlens::report::Report;
use cxlens::tree::JavaTreeProvider;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(&cli.path)?,
    };

    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(|e| Error::InvalidArgument(format!("--jobs {jobs}: {e}")))?;
    }

    let format = cli.output_format(&config);
    let provider = JavaTreeProvider::new()?;

    let report = match &cli.command {
        Command::Score(args) => {
            let files = FileSet::from_path(&cli.path, &config)?;
            let sources: Vec<MetricSource> = args.metrics.iter().copied().map(Into::into).collect();
            let analyzer = ScoreAnalyzer::new(sources).by_method(args.by_method);
            run_analyzer(&analyzer, &files, &config, &provider)?.to_report()
        }
        Command::Import(args) => {
            let files = FileSet::with_extensions(
                &args.reports,
                import::REPORT_EXTENSIONS,
                &config.exclude_patterns,
            )?;
            run_analyzer(&ImportAnalyzer::new(), &files, &config, &provider)?.to_report()
        }
        Command::Syntax => {
            let files = FileSet::from_path(&cli.path, &config)?;
            run_analyzer(&SyntaxAnalyzer::new(), &files, &config, &provider)?.to_report()
        }
    };

    emit(&report, format, cli.output_dir.as_deref())
}

fn run_analyzer<A: Analyzer>(
    analyzer: &A,
    files: &FileSet,
    config: &Config,
    provider: &JavaTreeProvider,
) -> Result<A::Output> {
    tracing::debug!(
        "Running {} over {} files under {}",
        analyzer.name(),
        files.len(),
        files.root().display()
    );

    let runner = ProcessRunner;
    let tracker = ProgressTracker::new(files.len(), analyzer.description());
    let ctx = AnalysisContext::new(files, config, provider, &runner)
        .with_progress(|current, _total| tracker.update(current));
    let result = analyzer.analyze(&ctx);
    tracker.finish_and_clear();
    result
}

fn emit(report: &Report, format: Format, output_dir: Option<&Path>) -> Result<()> {
    format.format(report, &mut stdout())?;
    if let Some(dir) = output_dir {
        report.write_csv_files(dir)?;
    }
    Ok(())
}
