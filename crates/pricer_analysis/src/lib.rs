//! # Pricer Analysis (L3: Application)
//!
//! Batch Black-Scholes analytics over tabular option data.
//!
//! This crate provides:
//! - Schema validation of option datasets with readable diagnostics
//! - Row-independent batch pricing with Rayon parallelisation
//! - Partial-failure tolerance: rows the engine rejects are skipped and counted
//! - Descriptive statistics, moneyness, and maturity-bucket averages
//! - CSV serialisation of the augmented table
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          pricer_analysis (L3)           │
//! ├─────────────────────────────────────────┤
//! │  dataset/   - RawTable, schema,         │
//! │               DatasetAnalyzer, summary  │
//! │  parallel/  - Rayon batch execution     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Closed-form Black-Scholes engine       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The analyzer performs no file I/O of its own: callers hand it a byte
//! stream or an already materialised [`dataset::RawTable`].
//!
//! ## Example
//!
//! ```
//! use pricer_analysis::dataset::DatasetAnalyzer;
//!
//! let csv = "Date,Stock_Price,Volatility,Risk_Free_Rate,Strike,Days_To_Maturity,Time_To_Maturity\n\
//!            2024-01-01,100.75,0.2,0.059,90.68,30,0.119\n";
//!
//! let analyzer = DatasetAnalyzer::from_reader(csv.as_bytes()).unwrap();
//! let priced = analyzer.price_all().unwrap();
//! let summary = priced.summarize();
//!
//! assert_eq!(summary.overview.priced_rows, 1);
//! assert!(summary.overview.avg_call_price.unwrap() > 10.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dataset;
pub mod error;
pub mod parallel;

pub use dataset::{DatasetAnalyzer, PricedDataset, SchemaValidation};
pub use error::AnalysisError;
