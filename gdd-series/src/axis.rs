use chrono::NaiveDate;
use gdd_season::{error::SeasonError, season::SeasonContext};
use gdd_utils::{dates::add_days, error::DateError};
use serde::{Deserialize, Serialize};

/// Date axis extent, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisBounds {
    /// The planting date.
    pub min: NaiveDate,
    /// Last displayed date: the last day of data, never past Oct 31.
    pub max: NaiveDate,
}

impl AxisBounds {
    /// The day after `max`, i.e. the axis end as an exclusive bound.
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        self.max.succ_opt()
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.min <= *date && *date <= self.max
    }
}

/// Compute the date axis for a season with `observed_len` days of data from Jan 1.
///
/// The exclusive end is the earlier of Nov 1 and Jan 1 + `observed_len`
/// days; `max` is the day before it. With no data at all `max` precedes
/// `min`.
pub fn bounds(season: &SeasonContext, observed_len: usize) -> Result<AxisBounds, SeasonError> {
    let start_of_season = season.start_of_season()?;
    let end_of_season = season.end_of_season()?;
    let end_of_data = add_days(&start_of_season, observed_len as i64)?;
    let end = end_of_season.min(end_of_data);
    let max = end
        .pred_opt()
        .ok_or_else(|| DateError(format!("no day before {end}")))?;
    Ok(AxisBounds {
        min: season.planting_date,
        max,
    })
}
