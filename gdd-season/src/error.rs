use chrono::NaiveDate;
use gdd_utils::error::DateError;
use std::fmt;

/// Errors related to season context and payload lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum SeasonError {
    /// Planting date falls outside Jan 1 - Oct 31 of its season year.
    PlantingDateOutsideSeason { planting_date: NaiveDate, year: i32 },
    /// Threshold identifier is not one of the known base temperatures.
    UnknownThreshold(String),
    /// Payload has no dataset for the requested threshold.
    MissingThreshold(String),
    Date(DateError),
}

impl fmt::Display for SeasonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonError::PlantingDateOutsideSeason {
                planting_date,
                year,
            } => write!(
                f,
                "planting date {planting_date} is outside the {year} season (Jan 1 - Oct 31)"
            ),
            SeasonError::UnknownThreshold(key) => write!(f, "unknown GDD threshold '{key}'"),
            SeasonError::MissingThreshold(key) => {
                write!(f, "payload has no data for threshold '{key}'")
            }
            SeasonError::Date(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SeasonError {}

impl From<DateError> for SeasonError {
    fn from(value: DateError) -> Self {
        SeasonError::Date(value)
    }
}
