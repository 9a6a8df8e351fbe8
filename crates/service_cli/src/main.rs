//! bsm - Black-Scholes-Merton command-line tool
//!
//! # Commands
//!
//! - `bsm quote` - Price one option with its Greeks
//! - `bsm sensitivity --parameter <name>` - Sweep one input
//! - `bsm validate --input <file>` - Check a dataset against the schema
//! - `bsm analyze --input <file>` - Price and summarise a dataset
//!
//! # Architecture
//!
//! As the **S**ervice layer, this binary parses arguments, loads
//! configuration, installs logging, and hands off to `service_cli::commands`.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use service_cli::commands::{self, quote::QuoteInputs, sensitivity::SweepRequest};
use service_cli::config::LogLevel;
use service_cli::output::OutputFormat;
use service_cli::CliConfig;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Black-Scholes-Merton option pricing and dataset analysis
#[derive(Parser)]
#[command(name = "bsm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "bsm.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// The five model inputs
#[derive(Args)]
struct MarketArgs {
    /// Underlying spot price
    #[arg(short, long)]
    spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    strike: f64,

    /// Time to maturity in years
    #[arg(short = 't', long)]
    maturity: f64,

    /// Continuously compounded risk-free rate (decimal)
    #[arg(short, long, allow_negative_numbers = true)]
    rate: f64,

    /// Annualised volatility (decimal)
    #[arg(short = 'o', long)]
    volatility: f64,
}

impl MarketArgs {
    fn inputs(&self) -> QuoteInputs {
        QuoteInputs {
            spot: self.spot,
            strike: self.strike,
            maturity: self.maturity,
            rate: self.rate,
            volatility: self.volatility,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single option and show its Greeks
    Quote {
        #[command(flatten)]
        market: MarketArgs,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Sweep one input and show call/put prices across the grid
    Sensitivity {
        #[command(flatten)]
        market: MarketArgs,

        /// Parameter to sweep (spot, strike, maturity, rate, volatility)
        #[arg(short, long)]
        parameter: String,

        /// Grid start (defaults depend on the parameter)
        #[arg(long, allow_negative_numbers = true)]
        from: Option<f64>,

        /// Grid end (defaults depend on the parameter)
        #[arg(long, allow_negative_numbers = true)]
        to: Option<f64>,

        /// Number of grid points, 2 to 100000 (defaults to the configured value)
        #[arg(short = 'n', long)]
        points: Option<usize>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check a CSV dataset against the option schema
    Validate {
        /// Path to the CSV dataset
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Price every row of a CSV dataset and summarise the results
    Analyze {
        /// Path to the CSV dataset
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the priced CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn init_tracing(level: LogLevel, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(LogLevel::Debug.as_filter_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    init_tracing(config.log_level, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let passed = match cli.command {
        Commands::Quote { market, format } => {
            commands::quote::run(&market.inputs(), format.parse::<OutputFormat>()?, &mut out)?;
            true
        }
        Commands::Sensitivity {
            market,
            parameter,
            from,
            to,
            points,
            format,
        } => {
            let request = SweepRequest {
                parameter,
                from,
                to,
                points: points.unwrap_or(config.sensitivity.points),
            };
            commands::sensitivity::run(
                &market.inputs(),
                &request,
                format.parse::<OutputFormat>()?,
                &mut out,
            )?;
            true
        }
        Commands::Validate { input } => commands::validate::run(&input, &mut out)?,
        Commands::Analyze {
            input,
            output,
            format,
        } => {
            commands::analyze::run(
                &input,
                output.as_deref(),
                format.parse::<OutputFormat>()?,
                &config.analyzer_config(),
                &mut out,
            )?;
            true
        }
    };

    out.flush()?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
