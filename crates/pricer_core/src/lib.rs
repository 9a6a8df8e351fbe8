//! # pricer_core: Numerical Foundation for Black-Scholes Analytics
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Standard normal distribution functions (`math::distributions`)
//! - Observation timestamps parsed from ISO 8601 text (`types::time`)
//! - Error types: `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - statrs: complementary error function backing Φ
//! - chrono: Date parsing and formatting
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::{norm_cdf, norm_pdf};
//! use pricer_core::types::ObservationDate;
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! assert!(norm_pdf(0.0) > norm_pdf(1.0));
//!
//! let date: ObservationDate = "2024-01-01".parse().unwrap();
//! assert_eq!(date.to_string(), "2024-01-01");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `ObservationDate`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
