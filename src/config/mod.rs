//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::engine::Traversal;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclude patterns (glob).
    #[serde(rename = "exclude")]
    pub exclude_patterns: Vec<String>,
    /// How relative paths map to grouping keys.
    pub grouping: GroupingConfig,
    /// Scoring engine settings.
    pub engine: EngineConfig,
    /// PMD invocation.
    pub pmd: PmdConfig,
    /// Readability model invocation.
    pub readability: ReadabilityConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_patterns: vec!["**/*scaffolding*".to_string()],
            grouping: GroupingConfig::default(),
            engine: EngineConfig::default(),
            pmd: PmdConfig::default(),
            readability: ReadabilityConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config` flags.
    /// Env vars with `CXLENS_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::core::Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed("CXLENS_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from directory, looking for cxlens.toml or .cxlens/cxlens.toml.
    ///
    /// Missing files are silently skipped (defaults are used).
    /// Env vars with `CXLENS_` prefix override file/default values.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join("cxlens.toml")))
            .merge(Toml::file(dir.join(".cxlens/cxlens.toml")))
            .merge(Env::prefixed("CXLENS_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create default config file content.
    pub fn default_toml() -> &'static str {
        include_str!("default_config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.grouping.labels.is_empty() {
            return Err(crate::core::Error::config(
                "grouping.labels must name at least one key component",
            ));
        }
        Ok(())
    }
}

/// Grouping key configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Column names of the key; the first `labels.len()` relative directory
    /// components of each file form its key.
    pub labels: Vec<String>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            labels: vec![
                "dataset".to_string(),
                "model".to_string(),
                "project".to_string(),
            ],
        }
    }
}

/// Scoring engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Traversal strategy.
    pub traversal: Traversal,
}

/// PMD configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PmdConfig {
    /// PMD launcher.
    pub program: String,
    /// Extra arguments passed before the generated ones.
    pub args: Vec<String>,
    /// Rule references passed to `-R`.
    pub rulesets: Vec<String>,
}

impl Default for PmdConfig {
    fn default() -> Self {
        Self {
            program: "pmd".to_string(),
            args: Vec::new(),
            rulesets: vec![
                "category/java/design.xml/CognitiveComplexity".to_string(),
                "category/java/design.xml/CyclomaticComplexity".to_string(),
            ],
        }
    }
}

/// Readability model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityConfig {
    /// Launcher.
    pub program: String,
    /// Arguments placed before the file path.
    pub args: Vec<String>,
    /// Working directory for the tool, if it must run next to its jar.
    pub working_dir: Option<PathBuf>,
    /// Output lines starting with one of these are not records.
    pub ignore_prefixes: Vec<String>,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: vec!["-jar".to_string(), "rsm.jar".to_string()],
            working_dir: None,
            ignore_prefixes: vec!["file".to_string(), "[INFO]".to_string()],
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// Markdown format.
    Markdown,
    /// Comma-separated values.
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            _ => Err(format!(
                "Unknown format: {s}. Use 'text', 'json', 'md' or 'csv'"
            )),
        }
    }
}
