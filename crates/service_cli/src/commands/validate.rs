//! Validate command implementation
//!
//! Checks a CSV dataset against the option schema without pricing it.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use pricer_analysis::dataset::DatasetAnalyzer;
use tracing::info;

use super::require_file;
use crate::Result;

/// Run the validate command.
///
/// Returns whether the dataset passed; the diagnostic is written to `out`.
pub fn run<W: Write>(input: &Path, out: &mut W) -> Result<bool> {
    require_file(input)?;
    info!("Validating {}", input.display());

    let analyzer = DatasetAnalyzer::from_reader(BufReader::new(File::open(input)?))?;
    let validation = analyzer.validate_schema();

    if validation.is_valid {
        writeln!(
            out,
            "✓ {} ({} rows)",
            validation.message,
            analyzer.table().len()
        )?;
    } else {
        writeln!(out, "✗ {}", validation.message)?;
    }

    Ok(validation.is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn validate(content: &str) -> (bool, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, content).unwrap();

        let mut out = Vec::new();
        let valid = run(&path, &mut out).unwrap();
        (valid, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_valid_dataset() {
        let (valid, text) = validate(
            "Date,Stock_Price,Volatility,Risk_Free_Rate,Strike,Days_To_Maturity,Time_To_Maturity\n\
             2024-01-01,100.75,0.2,0.059,90.68,30,0.119\n",
        );
        assert!(valid);
        assert_eq!(text, "✓ Data structure is valid (1 rows)\n");
    }

    #[test]
    fn test_missing_strike() {
        let (valid, text) = validate(
            "Date,Stock_Price,Volatility,Risk_Free_Rate,Days_To_Maturity,Time_To_Maturity\n\
             2024-01-01,100.75,0.2,0.059,30,0.119\n",
        );
        assert!(!valid);
        assert_eq!(text, "✗ Missing required columns: Strike\n");
    }

    #[test]
    fn test_missing_file() {
        let err = run(Path::new("/nonexistent/options.csv"), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
