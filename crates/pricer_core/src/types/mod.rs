//! Core time and error types.
//!
//! This module provides:
//! - `time`: [`ObservationDate`], the timestamp attached to each dataset row
//! - `error`: Structured error types for date parsing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`ObservationDate`] from `time`
//! - [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::DateError;
pub use time::ObservationDate;
