//! # Service CLI (S: Service Layer)
//!
//! Command implementations behind the `bsm` binary.
//!
//! # Commands
//!
//! - `bsm quote` - Price one option and print its Greeks
//! - `bsm sensitivity` - Sweep one input and print call/put price curves
//! - `bsm validate --input <csv>` - Check a dataset against the schema
//! - `bsm analyze --input <csv>` - Price a dataset, summarise, and write results
//!
//! Commands write their report to a caller-supplied `Write`; the binary
//! passes stdout while logs go to stderr.

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::CliConfig;
pub use error::{CliError, Result};
