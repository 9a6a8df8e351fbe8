//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - Analytical Greeks (Delta, Gamma, Vega, Theta)
//! - Sensitivity sweeps of call/put prices over one input parameter
//!
//! ## Design Principles
//!
//! - **Parameters validated once**: [`OptionParameters`] cannot hold values
//!   the engine would reject
//! - **Numerical Stability**: Φ(x) + Φ(-x) = 1 holds to rounding error, so
//!   parity holds even though Φ itself carries ~1e-10 relative error
//! - **No overflow in d₁**: d₁ is formed without squaring σ

pub mod black_scholes;
pub mod error;
pub mod params;
pub mod sensitivity;

// Re-export main types at module level
pub use black_scholes::{BlackScholes, OptionValuation};
pub use error::AnalyticalError;
pub use params::{OptionParameters, Parameter};
pub use sensitivity::{linspace, SensitivityCurve, SensitivityPoint};
