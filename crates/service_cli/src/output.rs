//! Report formats and box-drawn tables.

use std::io::Write;
use std::str::FromStr;

use crate::{CliError, Result};

/// Report format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Fixed-width table with a header row.
pub struct Table {
    widths: Vec<usize>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table; each column is at least as wide as its header.
    pub fn new<S: AsRef<str>>(header: &[S]) -> Self {
        let header: Vec<String> = header.iter().map(|h| h.as_ref().to_string()).collect();
        Self {
            widths: header.iter().map(|h| h.chars().count()).collect(),
            header,
            rows: Vec::new(),
        }
    }

    /// Appends a row, widening columns as needed.
    pub fn row(&mut self, cells: Vec<String>) {
        for (width, cell) in self.widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(cells);
    }

    /// Renders the table.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = self
                .widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!(" {}{} ", cell, " ".repeat(w - cell.chars().count()))
                })
                .collect();
            format!("│{}│", padded.join("│"))
        };

        writeln!(out, "{}", rule("┌", "┬", "┐"))?;
        writeln!(out, "{}", line(&self.header))?;
        writeln!(out, "{}", rule("├", "┼", "┤"))?;
        for row in &self.rows {
            writeln!(out, "{}", line(row))?;
        }
        writeln!(out, "{}", rule("└", "┴", "┘"))?;
        Ok(())
    }
}

/// Formats a value with four decimals; infinities print as `±inf`.
pub fn fmt4(value: f64) -> String {
    format!("{:.4}", value)
}

/// Formats an optional value, `-` when absent.
pub fn fmt4_opt(value: Option<f64>) -> String {
    value.map(fmt4).unwrap_or_else(|| "-".to_string())
}
