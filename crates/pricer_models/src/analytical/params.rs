//! Validated Black-Scholes input parameters.
//!
//! [`OptionParameters`] is the immutable value object handed to the pricing
//! engine. Its constructor enforces the model domain:
//!
//! | Parameter | Symbol | Constraint |
//! |-----------|--------|------------|
//! | spot | S | finite, > 0 |
//! | strike | K | finite, > 0 |
//! | time to maturity | T | finite, ≥ 0 |
//! | risk-free rate | r | finite |
//! | volatility | σ | finite, > 0 |

use std::fmt;
use std::str::FromStr;

use super::error::AnalyticalError;

/// Identifies one of the five model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Parameter {
    /// Underlying spot price (S)
    Spot,
    /// Strike price (K)
    Strike,
    /// Time to maturity in years (T)
    TimeToMaturity,
    /// Continuously compounded risk-free rate (r)
    RiskFreeRate,
    /// Annualised volatility (σ)
    Volatility,
}

impl Parameter {
    /// All parameters in constructor order.
    pub const ALL: [Parameter; 5] = [
        Parameter::Spot,
        Parameter::Strike,
        Parameter::TimeToMaturity,
        Parameter::RiskFreeRate,
        Parameter::Volatility,
    ];

    /// Human-readable parameter name.
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Spot => "spot",
            Parameter::Strike => "strike",
            Parameter::TimeToMaturity => "time to maturity",
            Parameter::RiskFreeRate => "risk-free rate",
            Parameter::Volatility => "volatility",
        }
    }

    /// Mathematical symbol used in the pricing formulas.
    pub fn symbol(&self) -> &'static str {
        match self {
            Parameter::Spot => "S",
            Parameter::Strike => "K",
            Parameter::TimeToMaturity => "T",
            Parameter::RiskFreeRate => "r",
            Parameter::Volatility => "σ",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spot" | "s" | "stock" | "stock_price" => Ok(Parameter::Spot),
            "strike" | "k" => Ok(Parameter::Strike),
            "maturity" | "t" | "time" | "time_to_maturity" => Ok(Parameter::TimeToMaturity),
            "rate" | "r" | "risk_free_rate" => Ok(Parameter::RiskFreeRate),
            "volatility" | "vol" | "sigma" => Ok(Parameter::Volatility),
            other => Err(format!(
                "Unknown parameter: {}. Supported: spot, strike, maturity, rate, volatility",
                other
            )),
        }
    }
}

/// Immutable, validated inputs of the Black-Scholes-Merton model.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{OptionParameters, Parameter};
///
/// let params = OptionParameters::new(100.0, 95.0, 0.5, 0.03, 0.25).unwrap();
/// assert_eq!(params.strike(), 95.0);
///
/// // Zero volatility is rejected, naming the parameter
/// let err = OptionParameters::new(100.0, 95.0, 0.5, 0.03, 0.0).unwrap_err();
/// assert_eq!(err.parameter(), Parameter::Volatility);
///
/// // Zero maturity is the admissible expiry boundary
/// assert!(OptionParameters::new(100.0, 95.0, 0.0, 0.03, 0.25).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParameters {
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    risk_free_rate: f64,
    volatility: f64,
}

impl OptionParameters {
    /// Creates validated option parameters.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price S (must be positive)
    /// * `strike` - Contract strike K (must be positive)
    /// * `time_to_maturity` - Years to expiry T (must be non-negative)
    /// * `risk_free_rate` - Annualised continuously compounded rate r (any finite value)
    /// * `volatility` - Annualised volatility σ (must be positive)
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` for the first input, in argument
    /// order, that violates its constraint. NaN never satisfies a constraint.
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        let params = Self {
            spot,
            strike,
            time_to_maturity,
            risk_free_rate,
            volatility,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), AnalyticalError> {
        for parameter in Parameter::ALL {
            let value = self.get(parameter);
            let reason = match parameter {
                Parameter::Spot | Parameter::Strike | Parameter::Volatility => {
                    (!(value > 0.0 && value.is_finite())).then_some("must be positive")
                }
                Parameter::TimeToMaturity => {
                    (!(value >= 0.0 && value.is_finite())).then_some("must be non-negative")
                }
                Parameter::RiskFreeRate => (!value.is_finite()).then_some("must be finite"),
            };
            if let Some(reason) = reason {
                return Err(AnalyticalError::InvalidParameter {
                    parameter,
                    value,
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Returns the value of the given parameter.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Spot => self.spot,
            Parameter::Strike => self.strike,
            Parameter::TimeToMaturity => self.time_to_maturity,
            Parameter::RiskFreeRate => self.risk_free_rate,
            Parameter::Volatility => self.volatility,
        }
    }

    /// Returns a copy with one parameter replaced, re-validated.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` if the new value is inadmissible.
    pub fn with(&self, parameter: Parameter, value: f64) -> Result<Self, AnalyticalError> {
        let mut next = *self;
        match parameter {
            Parameter::Spot => next.spot = value,
            Parameter::Strike => next.strike = value,
            Parameter::TimeToMaturity => next.time_to_maturity = value,
            Parameter::RiskFreeRate => next.risk_free_rate = value,
            Parameter::Volatility => next.volatility = value,
        }
        next.validate()?;
        Ok(next)
    }

    /// Returns the spot price S.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to maturity T in years.
    #[inline]
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    /// Returns the risk-free rate r.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Returns the volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the moneyness ratio S / K.
    #[inline]
    pub fn moneyness(&self) -> f64 {
        self.spot / self.strike
    }
}
