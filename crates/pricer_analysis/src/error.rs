//! Error types for dataset analysis.

use thiserror::Error;

use crate::dataset::schema::SchemaValidation;

/// Dataset analysis errors.
///
/// Row-level pricing failures are not errors: they are recorded as skipped
/// rows on the [`PricedDataset`](crate::dataset::PricedDataset).
///
/// # Variants
/// - `Csv`: Malformed CSV input or a failed CSV write
/// - `Io`: Underlying stream failure
/// - `Schema`: The table does not satisfy the option dataset schema
/// - `InvalidConfig`: Analyzer configuration rejected by validation
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// CSV parsing or serialisation failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading or writing the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema validation failed; nothing was computed.
    #[error("Schema validation failed: {}", .0.message)]
    Schema(SchemaValidation),

    /// Configuration values are out of range.
    #[error("Invalid analyzer configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display_uses_diagnostic() {
        let validation = SchemaValidation::missing(vec!["Strike".to_string()]);
        let err = AnalysisError::Schema(validation);
        assert_eq!(
            err.to_string(),
            "Schema validation failed: Missing required columns: Strike"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err: AnalysisError = io.into();
        assert!(matches!(err, AnalysisError::Io(_)));
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = AnalysisError::InvalidConfig("batch_size must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid analyzer configuration: batch_size must be positive"
        );
    }
}
