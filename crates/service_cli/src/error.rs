//! Error types for the CLI.

use pricer_analysis::AnalysisError;
use pricer_models::analytical::AnalyticalError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset could not be read, validated, or written
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Pricing inputs rejected by the engine
    #[error("Pricing error: {0}")]
    Pricing(#[from] AnalyticalError),

    /// Command-line argument has an unsupported value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
