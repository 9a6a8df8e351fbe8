//! CLI configuration management.
//!
//! Settings come from a TOML file (default `bsm.toml`, optional) and may be
//! overridden by `BSM_*` environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `BSM_LOG_LEVEL` | `log_level` |
//! | `BSM_BATCH_SIZE` | `analysis.batch_size` |
//! | `BSM_PARALLEL_THRESHOLD` | `analysis.parallel_threshold` |
//! | `BSM_SENSITIVITY_POINTS` | `sensitivity.points` |
//!
//! ```toml
//! log_level = "info"
//!
//! [analysis]
//! batch_size = 64
//! parallel_threshold = 100
//!
//! [sensitivity]
//! points = 100
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use pricer_analysis::dataset::AnalyzerConfig;
use pricer_analysis::parallel::{DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use pricer_models::analytical::sensitivity::DEFAULT_POINTS;

/// Smallest accepted sensitivity grid.
pub const MIN_SENSITIVITY_POINTS: usize = 2;

/// Largest accepted sensitivity grid.
pub const MAX_SENSITIVITY_POINTS: usize = 100_000;

/// Checks a sensitivity grid size against the accepted range.
///
/// Shared by config validation and the `--points` override.
pub fn check_sensitivity_points(points: usize) -> std::result::Result<(), String> {
    if points < MIN_SENSITIVITY_POINTS {
        return Err(format!(
            "sensitivity.points must be at least {}, got {}",
            MIN_SENSITIVITY_POINTS, points
        ));
    }
    if points > MAX_SENSITIVITY_POINTS {
        return Err(format!(
            "sensitivity.points {} exceeds maximum allowed ({})",
            points, MAX_SENSITIVITY_POINTS
        ));
    }
    Ok(())
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Config file is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Environment variable holds an unusable value
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// One or more settings out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-row detail
    Trace,
    /// Per-chunk progress
    Debug,
    /// Run summaries
    #[default]
    Info,
    /// Skipped rows and other anomalies
    Warn,
    /// Failures only
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Batch analysis settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Rows per chunk
    pub batch_size: usize,
    /// Row count at which pricing goes parallel
    pub parallel_threshold: usize,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Sensitivity sweep settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SensitivitySection {
    /// Grid points used when `--points` is not given
    pub points: usize,
}

impl Default for SensitivitySection {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Batch analysis settings
    pub analysis: AnalysisSection,
    /// Sensitivity sweep settings
    pub sensitivity: SensitivitySection,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `BSM_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("BSM_LOG_LEVEL") {
            self.log_level = level.parse()?;
        }

        if let Some(value) = lookup("BSM_BATCH_SIZE") {
            self.analysis.batch_size = parse_count("BSM_BATCH_SIZE", &value)?;
        }

        if let Some(value) = lookup("BSM_PARALLEL_THRESHOLD") {
            self.analysis.parallel_threshold = parse_count("BSM_PARALLEL_THRESHOLD", &value)?;
        }

        if let Some(value) = lookup("BSM_SENSITIVITY_POINTS") {
            self.sensitivity.points = parse_count("BSM_SENSITIVITY_POINTS", &value)?;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.analysis.batch_size == 0 {
            errors.push("analysis.batch_size must be greater than 0".to_string());
        }

        if let Err(message) = check_sensitivity_points(self.sensitivity.points) {
            errors.push(message);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from `path` (if present) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Analyzer settings derived from this configuration
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::new()
            .with_batch_size(self.analysis.batch_size)
            .with_parallel_threshold(self.analysis.parallel_threshold)
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} must be a whole number, got '{}'", key, value)))
}
