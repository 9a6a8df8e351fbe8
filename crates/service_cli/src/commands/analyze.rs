//! Analyze command implementation
//!
//! Prices every row of a CSV dataset, prints a summary, and optionally
//! writes the augmented table.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use pricer_analysis::dataset::{
    AnalyzerConfig, DatasetAnalyzer, DatasetSummary, PricedDataset, OUTPUT_COLUMNS,
};
use pricer_analysis::AnalysisError;
use serde::Serialize;
use tracing::info;

use super::require_file;
use crate::output::{fmt4, fmt4_opt, write_json, OutputFormat, Table};
use crate::Result;

#[derive(Serialize)]
struct SkippedReport {
    row: usize,
    reason: String,
}

#[derive(Serialize)]
struct AnalysisReport<'a> {
    input: String,
    output: Option<String>,
    summary: &'a DatasetSummary,
    skipped: Vec<SkippedReport>,
}

/// Run the analyze command
pub fn run<W: Write>(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    config: &AnalyzerConfig,
    out: &mut W,
) -> Result<()> {
    require_file(input)?;
    info!("Analyzing {}", input.display());

    let analyzer = DatasetAnalyzer::from_reader(BufReader::new(File::open(input)?))?
        .with_config(config.clone());

    let validation = analyzer.validate_schema();
    if !validation.is_valid {
        return Err(AnalysisError::Schema(validation).into());
    }

    let priced = analyzer.price_all()?;

    if let Some(path) = output {
        let mut writer = BufWriter::new(File::create(path)?);
        priced.write_csv(&mut writer)?;
        writer.flush()?;
        info!("Wrote {} rows to {}", priced.len(), path.display());
    }

    let summary = priced.summarize();
    match format {
        OutputFormat::Json => write_json(
            out,
            &AnalysisReport {
                input: input.display().to_string(),
                output: output.map(|p| p.display().to_string()),
                summary: &summary,
                skipped: skipped_reports(&priced),
            },
        ),
        OutputFormat::Table => write_tables(&priced, &summary, out),
    }
}

fn skipped_reports(priced: &PricedDataset) -> Vec<SkippedReport> {
    priced
        .skipped_rows()
        .iter()
        .map(|s| SkippedReport {
            row: s.index,
            reason: s.error.to_string(),
        })
        .collect()
}

fn write_tables<W: Write>(
    priced: &PricedDataset,
    summary: &DatasetSummary,
    out: &mut W,
) -> Result<()> {
    let overview = &summary.overview;
    writeln!(out, "Dataset Overview")?;
    writeln!(out, "  Total options:  {}", overview.total_rows)?;
    writeln!(out, "  Priced:         {}", overview.priced_rows)?;
    writeln!(out, "  Skipped:        {}", overview.skipped_rows)?;
    writeln!(out, "  Avg call price: {}", fmt4_opt(overview.avg_call_price))?;
    writeln!(out, "  Avg put price:  {}", fmt4_opt(overview.avg_put_price))?;
    if let (Some(first), Some(last)) = (overview.first_date, overview.last_date) {
        writeln!(out, "  Date range:     {} to {}", first, last)?;
    }

    if !summary.statistics.is_empty() {
        writeln!(out, "\nSummary Statistics")?;
        let mut table = Table::new(&[
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max", "non-finite",
        ]);
        let moneyness = summary.moneyness.iter().map(|s| ("Moneyness", s));
        let columns = summary
            .statistics
            .iter()
            .map(|n| (n.column.as_str(), &n.statistics));
        for (name, s) in columns.chain(moneyness) {
            table.row(vec![
                name.to_string(),
                s.count.to_string(),
                fmt4(s.mean),
                fmt4_opt(s.std),
                fmt4(s.min),
                fmt4(s.q25),
                fmt4(s.median),
                fmt4(s.q75),
                fmt4(s.max),
                s.non_finite.to_string(),
            ]);
        }
        table.write(out)?;
    }

    if !summary.maturity_groups.is_empty() {
        writeln!(out, "\nAverage Prices by Days to Maturity")?;
        let mut table = Table::new(&["Days", "Rows", "Avg Call", "Avg Put"]);
        for group in &summary.maturity_groups {
            table.row(vec![
                group.days_to_maturity.to_string(),
                group.count.to_string(),
                fmt4(group.avg_call_price),
                fmt4(group.avg_put_price),
            ]);
        }
        table.write(out)?;
    }

    if priced.skipped_count() > 0 {
        writeln!(
            out,
            "\nSkipped Rows ({} left empty in {} columns)",
            priced.skipped_count(),
            OUTPUT_COLUMNS.len()
        )?;
        for skipped in priced.skipped_rows() {
            writeln!(out, "  row {}: {}", skipped.index, skipped.error)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use pricer_analysis::dataset::RawTable;

    const DATA: &str = "Date,Stock_Price,Volatility,Risk_Free_Rate,Strike,Days_To_Maturity,Time_To_Maturity\n\
                        2024-01-01,100,0.2,0.05,100,365,1.0\n\
                        2024-01-02,105,0.0,0.05,100,365,1.0\n\
                        2024-01-03,95,0.25,0.05,100,30,0.0822\n";

    #[test]
    fn test_table_report_and_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("options.csv");
        let output = dir.path().join("priced.csv");
        std::fs::write(&input, DATA).unwrap();

        let mut out = Vec::new();
        run(
            &input,
            Some(&output),
            OutputFormat::Table,
            &AnalyzerConfig::default(),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total options:  3"));
        assert!(text.contains("Skipped:        1"));
        assert!(text.contains("Date range:     2024-01-01 to 2024-01-03"));
        assert!(text.contains("row 1: Invalid volatility"));

        let written = RawTable::from_reader(File::open(&output).unwrap()).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(written.cell(1, "Call_Price"), Some(""));
        assert!(written.cell(0, "Call_Price").unwrap().starts_with("10.45"));
    }

    #[test]
    fn test_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("options.csv");
        std::fs::write(&input, DATA).unwrap();

        let mut out = Vec::new();
        run(&input, None, OutputFormat::Json, &AnalyzerConfig::default(), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["summary"]["overview"]["skipped_rows"], 1);
        assert_eq!(json["skipped"][0]["row"], 1);
        assert!(json["output"].is_null());
    }

    #[test]
    fn test_schema_failure_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("options.csv");
        std::fs::write(&input, "Date,Strike\n2024-01-01,100\n").unwrap();

        let err = run(
            &input,
            None,
            OutputFormat::Table,
            &AnalyzerConfig::default(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Analysis(AnalysisError::Schema(_))));
        assert!(err.to_string().contains("Missing required columns: Stock_Price"));
    }
}
