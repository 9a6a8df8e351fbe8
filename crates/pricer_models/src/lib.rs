//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form Black-Scholes-Merton pricing of European options.
//!
//! This crate provides:
//! - Validated option parameters (`analytical::OptionParameters`)
//! - The pricing engine with analytical Greeks (`analytical::BlackScholes`)
//! - One-parameter sensitivity sweeps (`analytical::sensitivity`)
//!
//! ## Design Principles
//!
//! - **Immutable engines**: d₁ and d₂ are computed once at construction and
//!   every output is a pure function of the engine state
//! - **Validated construction**: invalid inputs are rejected with the
//!   offending parameter named, never silently corrected
//! - **Explicit expiry regime**: T = 0 returns limiting values instead of
//!   dividing by zero
//!
//! ```
//! use pricer_models::analytical::{BlackScholes, OptionParameters};
//!
//! let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let engine = BlackScholes::new(params);
//! assert!((engine.call_price() - 10.4506).abs() < 1e-4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
