//! Black-Scholes pricing engine for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Expiry (T = 0)
//!
//! The formulas divide by σ√T, so the engine switches to limiting values:
//! intrinsic prices, step deltas (½ at the strike), zero vega, and gamma /
//! theta that are zero away from the strike and infinite at it.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};

use super::params::OptionParameters;

/// Intermediate terms fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Regime {
    /// T > 0: the closed-form formulas apply.
    Live {
        d1: f64,
        d2: f64,
        sqrt_t: f64,
        discount: f64,
    },
    /// T = 0: limiting values.
    Expiry,
}

/// Black-Scholes pricing engine for a single European option.
///
/// Immutable and side-effect free: the same parameters always produce
/// bit-identical outputs.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{BlackScholes, OptionParameters};
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let bs = BlackScholes::new(params);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = bs.call_price() - bs.put_price() - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    params: OptionParameters,
    regime: Regime,
}

impl BlackScholes {
    /// Creates an engine and precomputes d₁, d₂, √T and the discount factor.
    pub fn new(params: OptionParameters) -> Self {
        let t = params.time_to_maturity();
        let regime = if t == 0.0 {
            Regime::Expiry
        } else {
            let sigma = params.volatility();
            let sqrt_t = t.sqrt();
            let vol_sqrt_t = sigma * sqrt_t;

            // d1 = ln(S/K)/(σ√T) + (r/σ)√T + σ√T/2, with σ² never formed
            let log_moneyness = (params.spot() / params.strike()).ln();
            let d1 = log_moneyness / vol_sqrt_t
                + params.risk_free_rate() / sigma * sqrt_t
                + 0.5 * vol_sqrt_t;

            Regime::Live {
                d1,
                d2: d1 - vol_sqrt_t,
                sqrt_t,
                discount: (-params.risk_free_rate() * t).exp(),
            }
        };

        Self { params, regime }
    }

    /// Validates the five inputs and creates an engine.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` naming the offending input.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::from_inputs(100.0, 100.0, 1.0, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::from_inputs(100.0, 100.0, 1.0, 0.05, 0.0).is_err());
    /// ```
    pub fn from_inputs(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<Self, super::AnalyticalError> {
        OptionParameters::new(spot, strike, time_to_maturity, risk_free_rate, volatility)
            .map(Self::new)
    }

    /// Returns the engine inputs.
    #[inline]
    pub fn params(&self) -> &OptionParameters {
        &self.params
    }

    /// Returns d₁, or `None` at expiry where it is unbounded.
    #[inline]
    pub fn d1(&self) -> Option<f64> {
        match self.regime {
            Regime::Live { d1, .. } => Some(d1),
            Regime::Expiry => None,
        }
    }

    /// Returns d₂, or `None` at expiry where it is unbounded.
    #[inline]
    pub fn d2(&self) -> Option<f64> {
        match self.regime {
            Regime::Live { d2, .. } => Some(d2),
            Regime::Expiry => None,
        }
    }

    /// Returns true when T = 0 and limiting values are reported.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.regime == Regime::Expiry
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂); max(S - K, 0) at expiry.
    #[inline]
    pub fn call_price(&self) -> f64 {
        let (s, k) = (self.params.spot(), self.params.strike());
        match self.regime {
            Regime::Live {
                d1, d2, discount, ..
            } => s * norm_cdf(d1) - k * discount * norm_cdf(d2),
            Regime::Expiry => (s - k).max(0.0),
        }
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁); max(K - S, 0) at expiry.
    #[inline]
    pub fn put_price(&self) -> f64 {
        let (s, k) = (self.params.spot(), self.params.strike());
        match self.regime {
            Regime::Live {
                d1, d2, discount, ..
            } => k * discount * norm_cdf(-d2) - s * norm_cdf(-d1),
            Regime::Expiry => (k - s).max(0.0),
        }
    }

    /// Computes call Delta (∂C/∂S) = N(d₁).
    ///
    /// At expiry: 1 in the money, ½ at the strike, 0 out of the money.
    #[inline]
    pub fn call_delta(&self) -> f64 {
        match self.regime {
            Regime::Live { d1, .. } => norm_cdf(d1),
            Regime::Expiry => {
                let (s, k) = (self.params.spot(), self.params.strike());
                if s > k {
                    1.0
                } else if s < k {
                    0.0
                } else {
                    0.5
                }
            }
        }
    }

    /// Computes put Delta (∂P/∂S) = -N(-d₁).
    #[inline]
    pub fn put_delta(&self) -> f64 {
        match self.regime {
            Regime::Live { d1, .. } => -norm_cdf(-d1),
            Regime::Expiry => self.call_delta() - 1.0,
        }
    }

    /// Computes Gamma (∂²V/∂S²) = φ(d₁) / (S·σ·√T).
    ///
    /// Gamma is the same for both calls and puts.
    #[inline]
    pub fn gamma(&self) -> f64 {
        match self.regime {
            Regime::Live { d1, sqrt_t, .. } => {
                norm_pdf(d1) / (self.params.spot() * self.params.volatility() * sqrt_t)
            }
            Regime::Expiry => self.at_strike_or_zero(f64::INFINITY),
        }
    }

    /// Computes Vega (∂V/∂σ) = S·√T·φ(d₁).
    ///
    /// Vega is the same for both calls and puts.
    #[inline]
    pub fn vega(&self) -> f64 {
        match self.regime {
            Regime::Live { d1, sqrt_t, .. } => self.params.spot() * sqrt_t * norm_pdf(d1),
            Regime::Expiry => 0.0,
        }
    }

    /// Computes call Theta.
    ///
    /// -(S·σ·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂)
    #[inline]
    pub fn call_theta(&self) -> f64 {
        match self.regime {
            Regime::Live {
                d1,
                d2,
                sqrt_t,
                discount,
            } => {
                self.theta_decay(d1, sqrt_t)
                    - self.params.risk_free_rate() * self.params.strike() * discount * norm_cdf(d2)
            }
            Regime::Expiry => self.at_strike_or_zero(f64::NEG_INFINITY),
        }
    }

    /// Computes put Theta.
    ///
    /// -(S·σ·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂)
    #[inline]
    pub fn put_theta(&self) -> f64 {
        match self.regime {
            Regime::Live {
                d1,
                d2,
                sqrt_t,
                discount,
            } => {
                self.theta_decay(d1, sqrt_t)
                    + self.params.risk_free_rate() * self.params.strike() * discount * norm_cdf(-d2)
            }
            Regime::Expiry => self.at_strike_or_zero(f64::NEG_INFINITY),
        }
    }

    /// Computes every output at once.
    pub fn valuation(&self) -> OptionValuation {
        OptionValuation {
            call_price: self.call_price(),
            put_price: self.put_price(),
            call_delta: self.call_delta(),
            put_delta: self.put_delta(),
            gamma: self.gamma(),
            vega: self.vega(),
            call_theta: self.call_theta(),
            put_theta: self.put_theta(),
        }
    }

    /// Common theta term -(S·σ·φ(d₁))/(2√T).
    #[inline]
    fn theta_decay(&self, d1: f64, sqrt_t: f64) -> f64 {
        -(self.params.spot() * norm_pdf(d1) * self.params.volatility()) / (2.0 * sqrt_t)
    }

    #[inline]
    fn at_strike_or_zero(&self, at_strike: f64) -> f64 {
        if self.params.spot() == self.params.strike() {
            at_strike
        } else {
            0.0
        }
    }
}

/// Prices and Greeks of one option, in output-column order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionValuation {
    /// Call price
    pub call_price: f64,
    /// Put price
    pub put_price: f64,
    /// Call delta, in [0, 1]
    pub call_delta: f64,
    /// Put delta, in [-1, 0]
    pub put_delta: f64,
    /// Gamma (call and put)
    pub gamma: f64,
    /// Vega (call and put)
    pub vega: f64,
    /// Call theta
    pub call_theta: f64,
    /// Put theta
    pub put_theta: f64,
}

impl OptionValuation {
    /// Number of outputs.
    pub const LEN: usize = 8;

    /// Returns the outputs as an array in declaration order.
    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.call_price,
            self.put_price,
            self.call_delta,
            self.put_delta,
            self.gamma,
            self.vega,
            self.call_theta,
            self.put_theta,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> BlackScholes {
        BlackScholes::from_inputs(s, k, t, r, sigma).unwrap()
    }

    fn reference() -> BlackScholes {
        engine(100.0, 100.0, 1.0, 0.05, 0.2)
    }

    // ==========================================================
    // d1/d2 Tests
    // ==========================================================

    #[test]
    fn test_d1_d2_reference() {
        // d1 = (0 + (0.05 + 0.02) * 1) / 0.2 = 0.35
        let bs = reference();
        assert_relative_eq!(bs.d1().unwrap(), 0.35, epsilon = 1e-12);
        assert_relative_eq!(bs.d2().unwrap(), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = engine(100.0, 105.0, 0.5, 0.05, 0.2);
        let expected_d2 = bs.d1().unwrap() - 0.2 * 0.5_f64.sqrt();
        assert_relative_eq!(bs.d2().unwrap(), expected_d2, epsilon = 1e-12);
    }

    #[test]
    fn test_extreme_volatility_stays_finite() {
        // σ² would overflow here
        let bs = engine(100.0, 100.0, 1.0, 0.05, 1e200);
        assert!(bs.d1().unwrap().is_finite());
        assert!(bs.d2().unwrap().is_finite());
        assert_relative_eq!(bs.call_price(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(bs.put_price(), 100.0 * (-0.05f64).exp(), max_relative = 1e-12);
        assert_eq!(bs.gamma(), 0.0);
        assert_eq!(bs.vega(), 0.0);
        assert!(bs.call_theta().is_finite());
    }

    #[test]
    fn test_d1_sign_follows_moneyness() {
        assert!(engine(150.0, 100.0, 1.0, 0.05, 0.2).d1().unwrap() > 1.0);
        assert!(engine(50.0, 100.0, 1.0, 0.05, 0.2).d1().unwrap() < -1.0);
    }

    // ==========================================================
    // Reference Values
    // ==========================================================

    #[test]
    fn test_reference_prices() {
        let bs = reference();
        assert_relative_eq!(bs.call_price(), 10.450583572185565, epsilon = 1e-8);
        assert_relative_eq!(bs.put_price(), 5.573526022256971, epsilon = 1e-8);
        assert_relative_eq!(bs.call_delta(), 0.6368306511756191, epsilon = 1e-10);
    }

    #[test]
    fn test_reference_greeks() {
        let bs = reference();
        assert_relative_eq!(bs.put_delta(), -0.3631693488243809, epsilon = 1e-10);
        assert_relative_eq!(bs.gamma(), 0.018762017345846895, epsilon = 1e-8);
        assert_relative_eq!(bs.vega(), 37.52403469169379, epsilon = 1e-6);
        assert_relative_eq!(bs.call_theta(), -6.414027546438197, epsilon = 1e-6);
        assert_relative_eq!(bs.put_theta(), -1.657880423934626, epsilon = 1e-6);
    }

    #[test]
    fn test_valuation_matches_accessors() {
        let bs = engine(95.0, 100.0, 0.25, 0.01, 0.35);
        let valuation = bs.valuation();
        assert_eq!(
            valuation.to_array(),
            [
                bs.call_price(),
                bs.put_price(),
                bs.call_delta(),
                bs.put_delta(),
                bs.gamma(),
                bs.vega(),
                bs.call_theta(),
                bs.put_theta(),
            ]
        );
    }

    #[test]
    fn test_repeated_reads_are_bit_identical() {
        let bs = engine(123.4, 99.9, 0.77, -0.01, 0.41);
        let first = bs.valuation();
        let second = bs.valuation();
        let rebuilt = engine(123.4, 99.9, 0.77, -0.01, 0.41).valuation();
        assert_eq!(first, second);
        assert_eq!(first, rebuilt);
    }

    // ==========================================================
    // Put-Call Parity and Symmetry
    // ==========================================================

    #[test]
    fn test_put_call_parity() {
        for (s, k, t, r, sigma) in [
            (100.0, 100.0, 1.0, 0.05, 0.2),
            (80.0, 100.0, 0.25, 0.01, 0.5),
            (150.0, 100.0, 2.0, -0.01, 0.15),
            (100.0, 120.0, 5.0, 0.08, 0.9),
        ] {
            let bs = engine(s, k, t, r, sigma);
            let forward_diff = s - k * (-r * t).exp();
            assert_relative_eq!(
                bs.call_price() - bs.put_price(),
                forward_diff,
                epsilon = 1e-9 * s.max(k)
            );
        }
    }

    #[test]
    fn test_delta_symmetry_and_bounds() {
        let bs = engine(90.0, 100.0, 0.5, 0.03, 0.3);
        assert_relative_eq!(bs.call_delta() - bs.put_delta(), 1.0, epsilon = 1e-15);
        assert!((0.0..=1.0).contains(&bs.call_delta()));
        assert!((-1.0..=0.0).contains(&bs.put_delta()));
    }

    // ==========================================================
    // Monotonicity
    // ==========================================================

    #[test]
    fn test_call_increasing_in_spot_and_vol() {
        let mut previous = 0.0;
        for i in 1..=40 {
            let price = engine(50.0 + 5.0 * i as f64, 100.0, 1.0, 0.05, 0.2).call_price();
            assert!(price >= previous);
            previous = price;
        }

        let mut previous = 0.0;
        for i in 1..=40 {
            let price = engine(100.0, 100.0, 1.0, 0.05, 0.025 * i as f64).call_price();
            assert!(price >= previous);
            previous = price;
        }
    }

    #[test]
    fn test_put_increasing_in_strike_and_vol() {
        let mut previous = 0.0;
        for i in 1..=40 {
            let price = engine(100.0, 50.0 + 5.0 * i as f64, 1.0, 0.05, 0.2).put_price();
            assert!(price >= previous);
            previous = price;
        }

        let mut previous = 0.0;
        for i in 1..=40 {
            let price = engine(100.0, 100.0, 1.0, 0.05, 0.025 * i as f64).put_price();
            assert!(price >= previous);
            previous = price;
        }
    }

    // ==========================================================
    // Expiry Boundary
    // ==========================================================

    #[test]
    fn test_expiry_intrinsic_prices() {
        let itm = engine(110.0, 100.0, 0.0, 0.05, 0.2);
        assert!(itm.is_expired());
        assert_eq!(itm.call_price(), 10.0);
        assert_eq!(itm.put_price(), 0.0);

        let otm = engine(90.0, 100.0, 0.0, 0.05, 0.2);
        assert_eq!(otm.call_price(), 0.0);
        assert_eq!(otm.put_price(), 10.0);
    }

    #[test]
    fn test_expiry_greeks_away_from_strike() {
        let itm = engine(110.0, 100.0, 0.0, 0.05, 0.2);
        assert_eq!(itm.d1(), None);
        assert_eq!(itm.call_delta(), 1.0);
        assert_eq!(itm.put_delta(), 0.0);
        assert_eq!(itm.gamma(), 0.0);
        assert_eq!(itm.vega(), 0.0);
        assert_eq!(itm.call_theta(), 0.0);
        assert_eq!(itm.put_theta(), 0.0);

        let otm = engine(90.0, 100.0, 0.0, 0.05, 0.2);
        assert_eq!(otm.call_delta(), 0.0);
        assert_eq!(otm.put_delta(), -1.0);
    }

    #[test]
    fn test_expiry_greeks_at_strike() {
        let atm = engine(100.0, 100.0, 0.0, 0.05, 0.2);
        assert_eq!(atm.call_price(), 0.0);
        assert_eq!(atm.put_price(), 0.0);
        assert_eq!(atm.call_delta(), 0.5);
        assert_eq!(atm.put_delta(), -0.5);
        assert_eq!(atm.gamma(), f64::INFINITY);
        assert_eq!(atm.call_theta(), f64::NEG_INFINITY);
        assert_eq!(atm.put_theta(), f64::NEG_INFINITY);
        assert_eq!(atm.vega(), 0.0);
    }

    #[test]
    fn test_expiry_never_produces_nan() {
        for s in [50.0, 100.0, 150.0] {
            let values = engine(s, 100.0, 0.0, 0.05, 0.2).valuation().to_array();
            assert!(values.iter().all(|v| !v.is_nan()), "NaN at S = {}", s);
        }
    }

    #[test]
    fn test_prices_converge_to_intrinsic_near_expiry() {
        for (s, intrinsic_call, intrinsic_put) in
            [(110.0, 10.0, 0.0), (90.0, 0.0, 10.0), (100.0, 0.0, 0.0)]
        {
            let bs = engine(s, 100.0, 1e-10, 0.05, 0.2);
            assert_relative_eq!(bs.call_price(), intrinsic_call, epsilon = 1e-4);
            assert_relative_eq!(bs.put_price(), intrinsic_put, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_gamma_and_theta_blow_up_at_strike_near_expiry() {
        let near = engine(100.0, 100.0, 1e-8, 0.05, 0.2);
        let far = engine(100.0, 100.0, 1.0, 0.05, 0.2);
        assert!(near.gamma() > 1_000.0 * far.gamma());
        assert!(near.call_theta() < 100.0 * far.call_theta());
    }

    #[test]
    fn test_deep_itm_and_otm() {
        let deep_itm = engine(200.0, 100.0, 1.0, 0.05, 0.2);
        assert!(deep_itm.call_price() >= 200.0 - 100.0 * (-0.05_f64).exp() - 1e-9);
        assert!(deep_itm.call_delta() > 0.999);

        let deep_otm = engine(50.0, 100.0, 1.0, 0.05, 0.2);
        assert!(deep_otm.call_price() < 0.01);
        assert!(deep_otm.call_price() >= 0.0);
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn inputs() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
            (
                1.0f64..500.0,
                1.0f64..500.0,
                0.01f64..5.0,
                -0.05f64..0.15,
                0.05f64..1.0,
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_put_call_parity_property((s, k, t, r, sigma) in inputs()) {
                let bs = engine(s, k, t, r, sigma);
                let lhs = bs.call_price() - bs.put_price();
                let rhs = s - k * (-r * t).exp();
                prop_assert!(
                    (lhs - rhs).abs() <= 1e-9 * s.max(k),
                    "parity violated: {} vs {}", lhs, rhs
                );
            }

            #[test]
            fn test_delta_bounds_property((s, k, t, r, sigma) in inputs()) {
                let bs = engine(s, k, t, r, sigma);
                prop_assert!((0.0..=1.0).contains(&bs.call_delta()));
                prop_assert!((-1.0..=0.0).contains(&bs.put_delta()));
                prop_assert!((bs.call_delta() - bs.put_delta() - 1.0).abs() < 1e-12);
            }

            #[test]
            fn test_gamma_vega_non_negative((s, k, t, r, sigma) in inputs()) {
                let bs = engine(s, k, t, r, sigma);
                prop_assert!(bs.gamma() >= 0.0);
                prop_assert!(bs.vega() >= 0.0);
            }

            #[test]
            fn test_call_monotone_in_spot((s, k, t, r, sigma) in inputs(), bump in 0.01f64..50.0) {
                let lower = engine(s, k, t, r, sigma).call_price();
                let upper = engine(s + bump, k, t, r, sigma).call_price();
                prop_assert!(upper >= lower - 1e-9 * s.max(k));
            }

            #[test]
            fn test_put_monotone_in_strike((s, k, t, r, sigma) in inputs(), bump in 0.01f64..50.0) {
                let lower = engine(s, k, t, r, sigma).put_price();
                let upper = engine(s, k + bump, t, r, sigma).put_price();
                prop_assert!(upper >= lower - 1e-9 * s.max(k));
            }

            #[test]
            fn test_prices_monotone_in_vol((s, k, t, r, sigma) in inputs(), bump in 0.001f64..0.5) {
                let base = engine(s, k, t, r, sigma);
                let bumped = engine(s, k, t, r, sigma + bump);
                let tolerance = 1e-9 * s.max(k);
                prop_assert!(bumped.call_price() >= base.call_price() - tolerance);
                prop_assert!(bumped.put_price() >= base.put_price() - tolerance);
            }
        }
    }
}
