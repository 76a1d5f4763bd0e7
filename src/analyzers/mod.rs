//! Batch pipelines over a file set.

pub mod complexity;
pub mod import;
pub mod syntax;

pub use complexity::Analyzer as ScoreAnalyzer;
pub use import::Analyzer as ImportAnalyzer;
pub use syntax::Analyzer as SyntaxAnalyzer;
