//! Error types for the cxlens library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using cxlens's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during scoring, import and aggregation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The syntax tree provider produced no tree for this input.
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The syntax tree provider itself is unusable (grammar failed to load).
    #[error("Syntax tree provider unavailable: {0}")]
    Provider(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An external tool (PMD, readability model) could not be run.
    #[error("External tool `{tool}` failed: {message}")]
    ExternalTool { tool: String, message: String },

    /// A structured report could not be read.
    #[error("Malformed report: {0}")]
    Report(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Report(err.to_string())
    }
}

impl Error {
    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an external tool error.
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("grouping.labels must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: grouping.labels must not be empty"
        );

        let err = Error::FileNotFound {
            path: PathBuf::from("FooTest.java"),
        };
        assert_eq!(err.to_string(), "File not found: FooTest.java");
    }

    #[test]
    fn test_external_tool_error() {
        let err = Error::external_tool("pmd", "exit status 1");
        match &err {
            Error::ExternalTool { tool, message } => {
                assert_eq!(tool, "pmd");
                assert_eq!(message, "exit status 1");
            }
            _ => panic!("Expected ExternalTool"),
        }
        assert_eq!(err.to_string(), "External tool `pmd` failed: exit status 1");
    }
}
