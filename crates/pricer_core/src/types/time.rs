//! Observation timestamps for option datasets.
//!
//! This module provides:
//! - `ObservationDate`: Type-safe wrapper around `chrono::NaiveDateTime`
//!   accepting the ISO 8601 spellings found in exported market data
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::ObservationDate;
//!
//! let day: ObservationDate = "2024-01-01".parse().unwrap();
//! let stamp: ObservationDate = "2024-01-01T15:30:00".parse().unwrap();
//! assert!(day < stamp);
//! assert_eq!(stamp.to_string(), "2024-01-01 15:30:00");
//! ```

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

use super::error::DateError;

/// Datetime layouts accepted besides RFC 3339 and the bare date.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Timestamp of a single option observation.
///
/// Dates without a time component are stored at midnight. Offsets carried
/// by RFC 3339 input are normalised to UTC.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::ObservationDate;
///
/// let date = ObservationDate::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date, ObservationDate::parse("2024-06-15").unwrap());
/// assert!(ObservationDate::parse("15/06/2024").is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObservationDate(NaiveDateTime);

impl ObservationDate {
    /// Creates a midnight timestamp from year, month, and day components.
    ///
    /// # Errors
    /// `DateError::InvalidDate` if the components do not form a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| ObservationDate(date.and_time(NaiveTime::MIN)))
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses an ISO 8601 date or datetime.
    ///
    /// Accepted forms: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (a space
    /// may replace the `T`), and RFC 3339 with an offset. Surrounding
    /// whitespace is ignored.
    ///
    /// # Errors
    /// `DateError::ParseError` carrying the rejected text.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let text = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(ObservationDate(date.and_time(NaiveTime::MIN)));
        }

        if let Some(stamp) = DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        {
            return Ok(ObservationDate(stamp));
        }

        DateTime::parse_from_rfc3339(text)
            .map(|stamp| ObservationDate(stamp.naive_utc()))
            .map_err(|_| DateError::ParseError {
                input: s.to_string(),
            })
    }

    /// Returns the underlying `NaiveDateTime`.
    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }

    /// Returns the calendar date, discarding the time of day.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns true when the timestamp carries no time of day.
    pub fn is_midnight(&self) -> bool {
        self.0.num_seconds_from_midnight() == 0 && self.0.nanosecond() == 0
    }
}

impl FromStr for ObservationDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        ObservationDate::parse(s)
    }
}

impl fmt::Display for ObservationDate {
    /// Formats as `YYYY-MM-DD`, appending `HH:MM:SS` only when a time of day is present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_midnight() {
            write!(f, "{}", self.0.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let date = ObservationDate::parse("2024-01-01").unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(date.is_midnight());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let date = ObservationDate::parse("  2024-03-15 ").unwrap();
        assert_eq!(date.to_string(), "2024-03-15");
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        for text in [
            "2024-03-15T09:30:00",
            "2024-03-15 09:30:00",
            "2024-03-15T09:30",
            "2024-03-15 09:30",
            "2024-03-15T09:30:00.000",
        ] {
            let parsed = ObservationDate::parse(text).unwrap();
            assert_eq!(parsed.into_inner(), expected, "failed for {}", text);
        }
    }

    #[test]
    fn test_parse_rfc3339_normalises_to_utc() {
        let parsed = ObservationDate::parse("2024-03-15T11:30:00+02:00").unwrap();
        assert_eq!(parsed.to_string(), "2024-03-15 09:30:00");

        let zulu = ObservationDate::parse("2024-03-15T09:30:00Z").unwrap();
        assert_eq!(parsed, zulu);
    }

    #[test]
    fn test_parse_rejects_non_iso_text() {
        for text in ["", "not-a-date", "15/03/2024", "2024-13-01", "2024-02-30"] {
            match ObservationDate::parse(text) {
                Err(DateError::ParseError { input }) => assert_eq!(input, text),
                other => panic!("Expected ParseError for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_from_ymd_invalid() {
        assert_eq!(
            ObservationDate::from_ymd(2023, 2, 29),
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_ordering_and_display() {
        let earlier = ObservationDate::from_ymd(2024, 1, 1).unwrap();
        let later = ObservationDate::parse("2024-01-01 00:00:01").unwrap();
        assert!(earlier < later);
        assert_eq!(earlier.to_string(), "2024-01-01");
        assert_eq!(later.to_string(), "2024-01-01 00:00:01");
        assert_eq!(later.year(), 2024);
    }
}
