//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors raised while constructing a pricing engine

use thiserror::Error;

use super::params::Parameter;

/// Analytical pricing errors.
///
/// Construction of [`OptionParameters`](super::OptionParameters) is the only
/// fallible step of the engine; once built, every output is defined.
///
/// # Variants
/// - `InvalidParameter`: A model input outside its admissible domain
///
/// # Examples
/// ```
/// use pricer_models::analytical::{AnalyticalError, Parameter};
///
/// let err = AnalyticalError::InvalidParameter {
///     parameter: Parameter::Volatility,
///     value: 0.0,
///     reason: "must be positive",
/// };
/// assert_eq!(format!("{}", err), "Invalid volatility: σ = 0 (must be positive)");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// A model input is outside its admissible domain.
    #[error("Invalid {parameter}: {symbol} = {value} ({reason})", symbol = .parameter.symbol())]
    InvalidParameter {
        /// The offending parameter
        parameter: Parameter,
        /// The rejected value
        value: f64,
        /// Constraint the value violates
        reason: &'static str,
    },
}

impl AnalyticalError {
    /// Returns the parameter that caused the error.
    pub fn parameter(&self) -> Parameter {
        match self {
            AnalyticalError::InvalidParameter { parameter, .. } => *parameter,
        }
    }
}
