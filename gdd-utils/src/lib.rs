//! Shared utility functions for GDD crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Datelike, NaiveDate, TimeDelta};

    /// Date format used by the data service: "YYYY-MM-DD"
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Date format used for planting dates: "MM/DD/YYYY"
    pub const PLANTING_FORMAT: &str = "%m/%d/%Y";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
            .map_err(|e| DateError(format!("'{s}' is not a YYYY-MM-DD date: {e}")))
    }

    /// Format a NaiveDate as a planting date, "MM/DD/YYYY"
    pub fn format_planting_date(date: &NaiveDate) -> String {
        date.format(PLANTING_FORMAT).to_string()
    }

    /// Parse a planting date string in "MM/DD/YYYY" format
    pub fn parse_planting_date(s: &str) -> Result<NaiveDate, DateError> {
        NaiveDate::parse_from_str(s.trim(), PLANTING_FORMAT)
            .map_err(|e| DateError(format!("'{s}' is not a MM/DD/YYYY date: {e}")))
    }

    /// January 1 of the given year.
    pub fn jan_1(year: i32) -> Result<NaiveDate, DateError> {
        NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| DateError(format!("no Jan 1 in {year}")))
    }

    /// Day of the year, 1-based (Jan 1 = 1, Dec 31 = 365 or 366).
    pub fn day_of_year(date: &NaiveDate) -> u32 {
        date.ordinal()
    }

    /// Signed number of days from January 1 of `year` to `date`.
    /// Jan 1 of `year` = 0; dates in an earlier year are negative.
    pub fn days_since_jan_1(date: &NaiveDate, year: i32) -> Result<i64, DateError> {
        let start = jan_1(year)?;
        Ok((*date - start).num_days())
    }

    /// Shift a date by a signed number of days.
    pub fn add_days(date: &NaiveDate, days: i64) -> Result<NaiveDate, DateError> {
        TimeDelta::try_days(days)
            .and_then(|delta| date.checked_add_signed(delta))
            .ok_or_else(|| DateError(format!("{date} + {days} days is out of range")))
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
