//! One-parameter sensitivity sweeps.
//!
//! Re-prices an option across an evenly spaced grid of values for one input
//! while holding the other four fixed, producing the call and put price
//! curves shown next to a single quote.

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;
use super::params::{OptionParameters, Parameter};

/// Default number of grid points in a sweep.
pub const DEFAULT_POINTS: usize = 100;

/// Returns `points` evenly spaced values from `start` to `end` inclusive.
///
/// # Examples
/// ```
/// use pricer_models::analytical::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// assert!(linspace(2.0, 3.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Default sweep bounds for a parameter around the base quote.
///
/// Spot and strike span ±50 around the base value (floored at 1); the other
/// inputs span fixed market ranges.
pub fn default_range(base: &OptionParameters, parameter: Parameter) -> (f64, f64) {
    match parameter {
        Parameter::Spot | Parameter::Strike => {
            let centre = base.get(parameter);
            ((centre - 50.0).max(1.0), centre + 50.0)
        }
        Parameter::TimeToMaturity => (0.1, 2.0),
        Parameter::RiskFreeRate => (0.01, 0.15),
        Parameter::Volatility => (0.1, 0.5),
    }
}

/// Call and put prices at one grid value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensitivityPoint {
    /// Value of the swept parameter
    pub value: f64,
    /// Call price at that value
    pub call_price: f64,
    /// Put price at that value
    pub put_price: f64,
}

/// Price curves for one swept parameter.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{OptionParameters, Parameter, SensitivityCurve};
///
/// let base = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let curve = SensitivityCurve::with_defaults(&base, Parameter::Volatility).unwrap();
///
/// assert_eq!(curve.points().len(), 100);
/// assert_eq!(curve.points()[0].value, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SensitivityCurve {
    parameter: Parameter,
    points: Vec<SensitivityPoint>,
}

impl SensitivityCurve {
    /// Sweeps `parameter` over `grid`.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` for the first grid value the
    /// engine rejects; no partial curve is returned.
    pub fn sweep(
        base: &OptionParameters,
        parameter: Parameter,
        grid: &[f64],
    ) -> Result<Self, AnalyticalError> {
        let points = grid
            .iter()
            .map(|&value| {
                let engine = BlackScholes::new(base.with(parameter, value)?);
                Ok(SensitivityPoint {
                    value,
                    call_price: engine.call_price(),
                    put_price: engine.put_price(),
                })
            })
            .collect::<Result<Vec<_>, AnalyticalError>>()?;

        Ok(Self { parameter, points })
    }

    /// Sweeps `parameter` over `points` values between `start` and `end`.
    ///
    /// # Errors
    /// See [`SensitivityCurve::sweep`].
    pub fn over_range(
        base: &OptionParameters,
        parameter: Parameter,
        start: f64,
        end: f64,
        points: usize,
    ) -> Result<Self, AnalyticalError> {
        Self::sweep(base, parameter, &linspace(start, end, points))
    }

    /// Sweeps `parameter` over its [`default_range`] with [`DEFAULT_POINTS`] values.
    ///
    /// # Errors
    /// See [`SensitivityCurve::sweep`].
    pub fn with_defaults(
        base: &OptionParameters,
        parameter: Parameter,
    ) -> Result<Self, AnalyticalError> {
        let (start, end) = default_range(base, parameter);
        Self::over_range(base, parameter, start, end, DEFAULT_POINTS)
    }

    /// Returns the swept parameter.
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    /// Returns the curve points in grid order.
    pub fn points(&self) -> &[SensitivityPoint] {
        &self.points
    }
}
