//! Sensitivity command implementation
//!
//! Sweeps one model input across a grid and reports call and put prices
//! at each point.

use std::io::Write;

use pricer_models::analytical::sensitivity::default_range;
use pricer_models::analytical::{Parameter, SensitivityCurve};
use tracing::info;

use super::quote::QuoteInputs;
use crate::config::check_sensitivity_points;
use crate::output::{fmt4, write_json, OutputFormat, Table};
use crate::{CliError, Result};

/// Sweep settings; unset bounds fall back to the parameter's default range.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRequest {
    /// Parameter name, e.g. `volatility` or `spot`
    pub parameter: String,
    /// Lower bound of the grid
    pub from: Option<f64>,
    /// Upper bound of the grid
    pub to: Option<f64>,
    /// Number of grid points
    pub points: usize,
}

/// Run the sensitivity command
pub fn run<W: Write>(
    base: &QuoteInputs,
    request: &SweepRequest,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let parameter: Parameter = request
        .parameter
        .parse()
        .map_err(CliError::InvalidArgument)?;
    check_sensitivity_points(request.points).map_err(CliError::InvalidArgument)?;

    let params = base.parameters()?;
    let (default_from, default_to) = default_range(&params, parameter);
    let from = request.from.unwrap_or(default_from);
    let to = request.to.unwrap_or(default_to);

    info!(
        %parameter,
        from,
        to,
        points = request.points,
        "Running sensitivity sweep"
    );
    let curve = SensitivityCurve::over_range(&params, parameter, from, to, request.points)?;

    match format {
        OutputFormat::Json => write_json(out, &curve),
        OutputFormat::Table => {
            writeln!(
                out,
                "Sensitivity to {} ({}) from {} to {}",
                parameter,
                parameter.symbol(),
                from,
                to
            )?;
            let mut table = Table::new(&[parameter.symbol(), "Call", "Put"]);
            for point in curve.points() {
                table.row(vec![
                    fmt4(point.value),
                    fmt4(point.call_price),
                    fmt4(point.put_price),
                ]);
            }
            table.write(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_SENSITIVITY_POINTS, MIN_SENSITIVITY_POINTS};

    fn base() -> QuoteInputs {
        QuoteInputs {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.05,
            volatility: 0.2,
        }
    }

    fn request(parameter: &str, from: Option<f64>, to: Option<f64>, points: usize) -> SweepRequest {
        SweepRequest {
            parameter: parameter.to_string(),
            from,
            to,
            points,
        }
    }

    #[test]
    fn test_table_uses_explicit_range() {
        let mut out = Vec::new();
        run(
            &base(),
            &request("spot", Some(90.0), Some(110.0), 3),
            OutputFormat::Table,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Sensitivity to spot (S) from 90 to 110\n"));
        assert!(text.contains("│ 100.0000 │ 10.4506 │ 5.5735  │"));
        // header + 3 rows + 3 rules + title
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_json_uses_default_range() {
        let mut out = Vec::new();
        run(
            &base(),
            &request("vol", None, None, 5),
            OutputFormat::Json,
            &mut out,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["parameter"], "volatility");
        let points = json["points"].as_array().unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0]["value"], 0.1);
        assert_eq!(points[4]["value"], 0.5);
    }

    #[test]
    fn test_unknown_parameter() {
        let err = run(
            &base(),
            &request("dividend", None, None, 10),
            OutputFormat::Table,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_grid_point_aborts() {
        let err = run(
            &base(),
            &request("volatility", Some(-0.1), Some(0.3), 5),
            OutputFormat::Table,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Pricing(_)));
    }

    #[test]
    fn test_points_outside_configured_bounds_rejected() {
        for points in [0, 1, MAX_SENSITIVITY_POINTS + 1] {
            let mut out = Vec::new();
            let err = run(
                &base(),
                &request("spot", None, None, points),
                OutputFormat::Json,
                &mut out,
            )
            .unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument(_)));
            assert!(err.to_string().contains("sensitivity.points"));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_points_at_bounds_accepted() {
        let mut out = Vec::new();
        run(
            &base(),
            &request("rate", None, None, MIN_SENSITIVITY_POINTS),
            OutputFormat::Json,
            &mut out,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["points"].as_array().unwrap().len(), MIN_SENSITIVITY_POINTS);
    }
}
