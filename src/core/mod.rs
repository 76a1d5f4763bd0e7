//! Core types and traits for code analysis.

mod analyzer;
mod error;
mod file_set;
pub mod progress;
mod source_file;

pub use analyzer::{AnalysisContext, Analyzer};
pub use error::{Error, Result};
pub use file_set::FileSet;
pub use source_file::SourceFile;
