//! Quote command implementation
//!
//! Prices a single European option and reports all eight outputs.

use std::io::Write;

use pricer_models::analytical::{BlackScholes, OptionParameters, OptionValuation};
use serde::Serialize;
use tracing::info;

use crate::output::{fmt4, write_json, OutputFormat, Table};
use crate::Result;

/// The five model inputs as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteInputs {
    /// Spot price S
    pub spot: f64,
    /// Strike K
    pub strike: f64,
    /// Years to maturity T
    pub maturity: f64,
    /// Risk-free rate r
    pub rate: f64,
    /// Volatility σ
    pub volatility: f64,
}

impl QuoteInputs {
    /// Validates the inputs.
    pub fn parameters(&self) -> Result<OptionParameters> {
        Ok(OptionParameters::new(
            self.spot,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
        )?)
    }
}

#[derive(Serialize)]
struct QuoteReport {
    parameters: OptionParameters,
    moneyness: f64,
    expired: bool,
    valuation: OptionValuation,
}

/// Run the quote command
pub fn run<W: Write>(inputs: &QuoteInputs, format: OutputFormat, out: &mut W) -> Result<()> {
    let params = inputs.parameters()?;
    info!(
        spot = params.spot(),
        strike = params.strike(),
        maturity = params.time_to_maturity(),
        rate = params.risk_free_rate(),
        volatility = params.volatility(),
        "Pricing quote"
    );

    let engine = BlackScholes::new(params);
    let valuation = engine.valuation();

    match format {
        OutputFormat::Json => write_json(
            out,
            &QuoteReport {
                parameters: params,
                moneyness: params.moneyness(),
                expired: engine.is_expired(),
                valuation,
            },
        ),
        OutputFormat::Table => {
            let mut table = Table::new(&["", "Call", "Put"]);
            let rows = [
                ("Price", valuation.call_price, valuation.put_price),
                ("Delta", valuation.call_delta, valuation.put_delta),
                ("Gamma", valuation.gamma, valuation.gamma),
                ("Vega", valuation.vega, valuation.vega),
                ("Theta", valuation.call_theta, valuation.put_theta),
            ];
            for (name, call, put) in rows {
                table.row(vec![name.to_string(), fmt4(call), fmt4(put)]);
            }

            writeln!(
                out,
                "S = {}  K = {}  T = {}  r = {}  σ = {}  (S/K = {:.4})",
                params.spot(),
                params.strike(),
                params.time_to_maturity(),
                params.risk_free_rate(),
                params.volatility(),
                params.moneyness()
            )?;
            if engine.is_expired() {
                writeln!(out, "Option is at expiry: prices are intrinsic values")?;
            }
            table.write(out)
        }
    }
}
