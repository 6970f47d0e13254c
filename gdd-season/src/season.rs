use crate::error::SeasonError;
use chrono::{Datelike, NaiveDate};
use gdd_utils::dates::{day_of_year, jan_1, parse_planting_date};
use log::debug;
use serde::{Deserialize, Serialize};

/// Month (1-based) of the last day of the growing season.
pub const SEASON_LAST_MONTH: u32 = 10;
/// Day of the last day of the growing season.
pub const SEASON_LAST_DAY: u32 = 31;
/// A new season becomes selectable on the first day of this month.
pub const SEASON_SELECTABLE_MONTH: u32 = 3;

/// The season year plus the planting date accumulation is baselined at.
///
/// The planting date always lies between Jan 1 and Oct 31 of `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonContext {
    pub year: i32,
    pub planting_date: NaiveDate,
}

impl SeasonContext {
    /// Build a season context, rejecting planting dates outside Jan 1 - Oct 31 of `year`.
    pub fn new(year: i32, planting_date: NaiveDate) -> Result<SeasonContext, SeasonError> {
        let context = SeasonContext {
            year,
            planting_date,
        };
        if planting_date < context.start_of_season()? || planting_date > context.last_day_of_season()? {
            return Err(SeasonError::PlantingDateOutsideSeason {
                planting_date,
                year,
            });
        }
        Ok(context)
    }

    /// Season context whose year is the planting date's year.
    pub fn from_planting_date(planting_date: NaiveDate) -> Result<SeasonContext, SeasonError> {
        SeasonContext::new(planting_date.year(), planting_date)
    }

    /// January 1 of the season year.
    pub fn start_of_season(&self) -> Result<NaiveDate, SeasonError> {
        Ok(jan_1(self.year)?)
    }

    /// October 31 of the season year, the last date ever displayed.
    pub fn last_day_of_season(&self) -> Result<NaiveDate, SeasonError> {
        season_date(self.year, SEASON_LAST_MONTH, SEASON_LAST_DAY)
    }

    /// November 1 of the season year, the exclusive end of the season.
    pub fn end_of_season(&self) -> Result<NaiveDate, SeasonError> {
        season_date(self.year, SEASON_LAST_MONTH + 1, 1)
    }

    /// 1-based day of year of the planting date.
    pub fn planting_day_of_year(&self) -> u32 {
        day_of_year(&self.planting_date)
    }
}

fn season_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, SeasonError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        SeasonError::Date(gdd_utils::error::DateError(format!(
            "no {month}/{day} in {year}"
        )))
    })
}

/// The most recent season a user can select. Seasons roll over on Mar 1:
/// in January and February the previous year is still the active season.
pub fn latest_selectable_year(today: NaiveDate) -> i32 {
    if today.month() < SEASON_SELECTABLE_MONTH {
        today.year() - 1
    } else {
        today.year()
    }
}

/// Jan 1 of the latest selectable season.
pub fn default_planting_date(today: NaiveDate) -> Result<NaiveDate, SeasonError> {
    Ok(jan_1(latest_selectable_year(today))?)
}

/// Pick the planting date to display from an optional saved "MM/DD/YYYY" value.
///
/// A saved value is honored only when it parses and belongs to the latest
/// selectable season; anything else falls back to the default planting date.
pub fn resolve_planting_date(saved: Option<&str>, today: NaiveDate) -> Result<NaiveDate, SeasonError> {
    let latest_year = latest_selectable_year(today);
    if let Some(saved) = saved {
        match parse_planting_date(saved) {
            Ok(date) if date.year() == latest_year => return Ok(date),
            Ok(date) => debug!(
                "saved planting date {date} is not in the {latest_year} season, using default"
            ),
            Err(e) => debug!("ignoring saved planting date: {e}"),
        }
    }
    default_planting_date(today)
}
