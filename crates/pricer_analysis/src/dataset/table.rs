//! Raw tabular input and typed option records.
//!
//! [`RawTable`] holds a header row plus string cells exactly as read. It is
//! the one in-memory representation every input source reduces to, and the
//! analyzer never mutates a caller's table in place.

use std::io::Read;

use pricer_core::types::time::ObservationDate;
use pricer_models::analytical::{AnalyticalError, OptionParameters};

use super::schema::{
    ColumnLayout, DATE, DAYS_TO_MATURITY, RISK_FREE_RATE, STOCK_PRICE, STRIKE, TIME_TO_MATURITY,
    VOLATILITY,
};
use crate::error::AnalysisError;

/// Computed columns appended by pricing, in output order.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "Call_Price",
    "Put_Price",
    "Call_Delta",
    "Put_Delta",
    "Gamma",
    "Vega",
    "Call_Theta",
    "Put_Theta",
];

/// Header row plus string cells.
///
/// # Examples
/// ```
/// use pricer_analysis::dataset::RawTable;
///
/// let csv = "Date,Stock_Price\n2024-01-01,100.5\n";
/// let table = RawTable::from_reader(csv.as_bytes()).unwrap();
///
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.cell(0, "Stock_Price"), Some("100.5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table from already materialised headers and rows.
    ///
    /// Rows shorter than the header are treated as having empty trailing cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parses CSV text with a header row.
    ///
    /// Header names are trimmed; cells are kept verbatim.
    ///
    /// # Errors
    /// `AnalysisError::Csv` for malformed CSV, including rows whose field
    /// count differs from the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Self { headers, rows })
    }

    /// Returns the header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `row` in the named column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| cell_at(r, idx))
    }

    /// Returns a copy without the named columns.
    pub fn without_columns(&self, names: &[&str]) -> RawTable {
        let keep: Vec<usize> = (0..self.headers.len())
            .filter(|&i| !names.contains(&self.headers[i].as_str()))
            .collect();

        RawTable {
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| cell_at(row, i).to_string()).collect())
                .collect(),
        }
    }
}

/// Cell `idx` of a row; missing trailing cells read as empty.
pub(crate) fn cell_at(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// One typed option observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionRecord {
    /// Observation timestamp
    pub date: ObservationDate,
    /// Underlying price S
    pub stock_price: f64,
    /// Annualised volatility σ
    pub volatility: f64,
    /// Continuously compounded rate r
    pub risk_free_rate: f64,
    /// Strike K
    pub strike: f64,
    /// Calendar days to expiry
    pub days_to_maturity: u32,
    /// Years to expiry T, not cross-checked against `days_to_maturity`
    pub time_to_maturity: f64,
}

impl OptionRecord {
    /// Parses one row using a resolved column layout.
    ///
    /// Returns the name of the first required column whose cell does not
    /// convert.
    pub(crate) fn parse(layout: &ColumnLayout, row: &[String]) -> Result<Self, &'static str> {
        let float = |column: &'static str, idx: usize| {
            parse_float(cell_at(row, idx)).ok_or(column)
        };

        Ok(Self {
            date: ObservationDate::parse(cell_at(row, layout.date)).map_err(|_| DATE)?,
            stock_price: float(STOCK_PRICE, layout.stock_price)?,
            volatility: float(VOLATILITY, layout.volatility)?,
            risk_free_rate: float(RISK_FREE_RATE, layout.risk_free_rate)?,
            strike: float(STRIKE, layout.strike)?,
            days_to_maturity: parse_days(cell_at(row, layout.days_to_maturity))
                .ok_or(DAYS_TO_MATURITY)?,
            time_to_maturity: float(TIME_TO_MATURITY, layout.time_to_maturity)?,
        })
    }

    /// Builds validated engine inputs from this record.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` when the row violates the model domain.
    pub fn parameters(&self) -> Result<OptionParameters, AnalyticalError> {
        OptionParameters::new(
            self.stock_price,
            self.strike,
            self.time_to_maturity,
            self.risk_free_rate,
            self.volatility,
        )
    }

    /// Moneyness S / K.
    pub fn moneyness(&self) -> f64 {
        self.stock_price / self.strike
    }
}

/// Parses a floating-point cell, ignoring surrounding whitespace.
pub(crate) fn parse_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

/// Parses a non-negative whole day count.
///
/// Integral floats such as `30.0` are accepted; fractional or negative
/// values are not.
pub(crate) fn parse_days(cell: &str) -> Option<u32> {
    let text = cell.trim();
    if let Ok(days) = text.parse::<u32>() {
        return Some(days);
    }

    let value = parse_float(text)?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then_some(value as u32)
}
