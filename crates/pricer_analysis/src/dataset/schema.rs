//! Option dataset schema and validation.
//!
//! Validation is a reportable outcome, never a fault: [`validate_schema`]
//! always returns a [`SchemaValidation`] describing what, if anything, is
//! wrong with the table.

use std::fmt;

use pricer_core::types::time::ObservationDate;

use super::table::{cell_at, parse_days, parse_float, RawTable};

/// Observation date column.
pub const DATE: &str = "Date";
/// Underlying price column.
pub const STOCK_PRICE: &str = "Stock_Price";
/// Volatility column.
pub const VOLATILITY: &str = "Volatility";
/// Risk-free rate column.
pub const RISK_FREE_RATE: &str = "Risk_Free_Rate";
/// Strike column.
pub const STRIKE: &str = "Strike";
/// Whole days to expiry column.
pub const DAYS_TO_MATURITY: &str = "Days_To_Maturity";
/// Years to expiry column.
pub const TIME_TO_MATURITY: &str = "Time_To_Maturity";

/// Expected type of a required column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// ISO 8601 date or datetime
    Date,
    /// Floating-point number
    Float,
    /// Non-negative whole number, written as an integer or integral float
    Days,
}

impl ColumnKind {
    /// Returns true when `cell` converts to this kind.
    pub fn accepts(&self, cell: &str) -> bool {
        match self {
            ColumnKind::Date => ObservationDate::parse(cell).is_ok(),
            ColumnKind::Float => parse_float(cell).is_some(),
            ColumnKind::Days => parse_days(cell).is_some(),
        }
    }
}

/// Required columns in schema order.
pub const REQUIRED_COLUMNS: [(&str, ColumnKind); 7] = [
    (DATE, ColumnKind::Date),
    (STOCK_PRICE, ColumnKind::Float),
    (VOLATILITY, ColumnKind::Float),
    (RISK_FREE_RATE, ColumnKind::Float),
    (STRIKE, ColumnKind::Float),
    (DAYS_TO_MATURITY, ColumnKind::Days),
    (TIME_TO_MATURITY, ColumnKind::Float),
];

/// First unconvertible cell found in a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColumn {
    /// Column name
    pub column: String,
    /// Zero-based data row index
    pub row: usize,
    /// Offending cell text
    pub value: String,
}

impl fmt::Display for InvalidColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (row {}: '{}')", self.column, self.row, self.value)
    }
}

/// Outcome of schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidation {
    /// Whether the table can be priced
    pub is_valid: bool,
    /// Human-readable diagnostic
    pub message: String,
    /// Required columns absent from the header, in schema order
    pub missing_columns: Vec<String>,
    /// Required columns holding unconvertible values
    pub invalid_columns: Vec<InvalidColumn>,
}

impl SchemaValidation {
    /// A passing validation.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: "Data structure is valid".to_string(),
            missing_columns: Vec::new(),
            invalid_columns: Vec::new(),
        }
    }

    /// A failure listing absent columns.
    pub fn missing(columns: Vec<String>) -> Self {
        Self {
            is_valid: false,
            message: format!("Missing required columns: {}", columns.join(", ")),
            missing_columns: columns,
            invalid_columns: Vec::new(),
        }
    }

    /// A failure listing columns with unconvertible values.
    pub fn invalid(columns: Vec<InvalidColumn>) -> Self {
        let detail: Vec<String> = columns.iter().map(ToString::to_string).collect();
        Self {
            is_valid: false,
            message: format!("Error converting data types: {}", detail.join("; ")),
            missing_columns: Vec::new(),
            invalid_columns: columns,
        }
    }

    /// The `(is_valid, message)` pair.
    pub fn as_tuple(&self) -> (bool, &str) {
        (self.is_valid, &self.message)
    }
}

/// Header positions of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnLayout {
    pub date: usize,
    pub stock_price: usize,
    pub volatility: usize,
    pub risk_free_rate: usize,
    pub strike: usize,
    pub days_to_maturity: usize,
    pub time_to_maturity: usize,
}

impl ColumnLayout {
    /// Locates every required column, or lists the missing ones in schema order.
    pub fn resolve(table: &RawTable) -> Result<Self, Vec<String>> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|(name, _)| table.column_index(name).is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let idx = |name: &str| table.column_index(name).unwrap_or_default();
        Ok(Self {
            date: idx(DATE),
            stock_price: idx(STOCK_PRICE),
            volatility: idx(VOLATILITY),
            risk_free_rate: idx(RISK_FREE_RATE),
            strike: idx(STRIKE),
            days_to_maturity: idx(DAYS_TO_MATURITY),
            time_to_maturity: idx(TIME_TO_MATURITY),
        })
    }
}

/// Checks column presence, then the convertibility of every required cell.
///
/// Missing columns are reported first and short-circuit type checks.
///
/// # Examples
/// ```
/// use pricer_analysis::dataset::{validate_schema, RawTable};
///
/// let csv = "Date,Stock_Price,Volatility,Risk_Free_Rate,Days_To_Maturity,Time_To_Maturity\n\
///            2024-01-01,100,0.2,0.05,30,0.0822\n";
/// let table = RawTable::from_reader(csv.as_bytes()).unwrap();
///
/// let result = validate_schema(&table);
/// assert_eq!(result.as_tuple(), (false, "Missing required columns: Strike"));
/// ```
pub fn validate_schema(table: &RawTable) -> SchemaValidation {
    if let Err(missing) = ColumnLayout::resolve(table) {
        return SchemaValidation::missing(missing);
    }

    let invalid: Vec<InvalidColumn> = REQUIRED_COLUMNS
        .iter()
        .filter_map(|(name, kind)| {
            let idx = table.column_index(name)?;
            table.rows().iter().enumerate().find_map(|(row, cells)| {
                let cell = cell_at(cells, idx);
                (!kind.accepts(cell)).then(|| InvalidColumn {
                    column: name.to_string(),
                    row,
                    value: cell.to_string(),
                })
            })
        })
        .collect();

    if invalid.is_empty() {
        SchemaValidation::valid()
    } else {
        SchemaValidation::invalid(invalid)
    }
}
