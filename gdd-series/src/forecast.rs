use crate::axis::AxisBounds;
use chrono::NaiveDate;
use gdd_season::{dataset::RawThresholdDataset, error::SeasonError, season::SeasonContext};
use gdd_utils::dates::{add_days, days_since_jan_1};
use gdd_utils::error::DateError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::iter::once;

/// Where observed data ends in a planting-date aligned series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastSplit {
    /// Index of the last observed day relative to the planting date. With no
    /// forecast this is the raw observed length. May be negative or past the
    /// end of the series; [`ForecastSplit::segments`] clamps it.
    pub split_index: i64,
    /// Whether the forecast starts inside the season and the displayed axis.
    pub forecast_visible: bool,
    pub first_forecast_date: Option<NaiveDate>,
}

/// A series cut into its observed and forecast display segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SplitSeries {
    /// Series values through the last observed day.
    pub observed: Vec<f64>,
    /// A `None` gap followed by the forecast values, so a chart breaks the
    /// line instead of joining observed and forecast points. Empty when there
    /// is nothing to forecast.
    pub forecast: Vec<Option<f64>>,
    /// Offset from the planting date of `forecast[0]`, the gap slot.
    pub forecast_offset: i64,
}

impl SplitSeries {
    /// Date of the first forecast element (the gap), normally the last observed date.
    pub fn forecast_start(&self, planting_date: &NaiveDate) -> Result<NaiveDate, DateError> {
        add_days(planting_date, self.forecast_offset)
    }
}

impl ForecastSplit {
    pub fn has_forecast(&self) -> bool {
        self.first_forecast_date.is_some()
    }

    /// Cut an aligned series at the split index, clamping the index to the series.
    pub fn segments(&self, series: &[f64]) -> SplitSeries {
        let len = series.len() as i64;
        let end = (self.split_index + 1).clamp(0, len) as usize;
        let forecast = if self.has_forecast() && end < series.len() {
            once(None)
                .chain(series[end..].iter().copied().map(Some))
                .collect()
        } else {
            Vec::new()
        };
        SplitSeries {
            observed: series[..end].to_vec(),
            forecast,
            forecast_offset: end as i64 - 1,
        }
    }
}

/// Locate the observed/forecast boundary for the season-to-date view.
pub fn split(
    dataset: &RawThresholdDataset,
    season: &SeasonContext,
    axis: &AxisBounds,
) -> Result<ForecastSplit, SeasonError> {
    let Some(first_forecast_date) = dataset.first_forecast_date else {
        return Ok(ForecastSplit {
            split_index: dataset.observed_len() as i64,
            forecast_visible: false,
            first_forecast_date: None,
        });
    };

    let first_forecast_day = days_since_jan_1(&first_forecast_date, season.year)?;
    let split_index = first_forecast_day - season.planting_day_of_year() as i64;
    // axis end is Jan 1 + observed length here, one past `axis.max`
    let in_axis = axis
        .end_exclusive()
        .is_some_and(|end| first_forecast_date <= end);
    let forecast_visible = first_forecast_date <= season.last_day_of_season()? && in_axis;
    debug!(
        "forecast from {} splits at {} (visible: {})",
        first_forecast_date, split_index, forecast_visible
    );

    Ok(ForecastSplit {
        split_index,
        forecast_visible,
        first_forecast_date: Some(first_forecast_date),
    })
}

#[cfg(test)]
mod tests {
    use super::{split, ForecastSplit};
    use crate::aligner::{align, View};
    use crate::axis::{bounds, AxisBounds};
    use chrono::NaiveDate;
    use gdd_season::{dataset::RawThresholdDataset, season::SeasonContext};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 40 days of data (Jan 1 - Feb 9 2020), forecast from Feb 4.
    fn dataset(first_forecast_date: Option<NaiveDate>) -> RawThresholdDataset {
        let days: Vec<f64> = (0..40).map(|i| (i * 10) as f64).collect();
        let climatology: Vec<f64> = (0..366).map(|i| (i * 9) as f64).collect();
        RawThresholdDataset {
            observed: days,
            recent_average: climatology.clone(),
            normal: climatology.clone(),
            all_time_average: climatology,
            all_time_min_ratio: vec![0.5; 366],
            all_time_max_ratio: vec![1.5; 366],
            first_forecast_date,
        }
    }

    #[test]
    fn test_no_forecast() {
        let data = dataset(None);
        let season = SeasonContext::new(2020, date(2020, 1, 10)).unwrap();
        let axis = bounds(&season, data.observed_len()).unwrap();
        let result = split(&data, &season, &axis).unwrap();
        assert_eq!(
            result,
            ForecastSplit {
                split_index: 40,
                forecast_visible: false,
                first_forecast_date: None
            }
        );

        let series = align(&data, View::SeasonToDate, season.planting_date).unwrap();
        let segments = result.segments(&series.year_to_date);
        assert_eq!(segments.observed, series.year_to_date);
        assert!(segments.forecast.is_empty());
    }

    #[test]
    fn test_no_forecast_is_never_visible() {
        let data = dataset(None);
        let season = SeasonContext::new(2020, date(2020, 3, 1)).unwrap();
        for max in [date(2020, 1, 1), date(2020, 6, 1), date(2020, 10, 31)] {
            let axis = AxisBounds {
                min: season.planting_date,
                max,
            };
            assert!(!split(&data, &season, &axis).unwrap().forecast_visible);
        }
    }

    #[test]
    fn test_split_at_last_observed_day() {
        let data = dataset(Some(date(2020, 2, 4)));
        let season = SeasonContext::new(2020, date(2020, 1, 10)).unwrap();
        let axis = bounds(&season, data.observed_len()).unwrap();
        let result = split(&data, &season, &axis).unwrap();
        // Feb 4 is 34 days after Jan 1, planting is day 10
        assert_eq!(result.split_index, 24);
        assert!(result.forecast_visible);

        let series = align(&data, View::SeasonToDate, season.planting_date).unwrap();
        assert_eq!(series.year_to_date.len(), 31);
        let segments = result.segments(&series.year_to_date);
        assert_eq!(segments.observed.len(), 25);
        // last observed value is Feb 3, index 33 raw: 330 - 90
        assert_eq!(segments.observed.last(), Some(&240.0));
        assert_eq!(segments.forecast.len(), 7);
        assert_eq!(segments.forecast[0], None);
        assert_eq!(segments.forecast[1], Some(250.0));
        assert_eq!(segments.forecast[6], Some(300.0));
        assert_eq!(
            segments.forecast_start(&season.planting_date).unwrap(),
            date(2020, 2, 3)
        );
        assert_eq!(data.last_observed_date(), Some(date(2020, 2, 3)));
    }

    #[test]
    fn test_forecast_on_day_after_data_is_visible() {
        let data = dataset(Some(date(2020, 2, 4)));
        let season = SeasonContext::new(2020, date(2020, 1, 10)).unwrap();
        // 34 days of data: Jan 1 - Feb 3, axis end Feb 4
        let axis = bounds(&season, 34).unwrap();
        assert_eq!(axis.max, date(2020, 2, 3));
        assert_eq!(axis.end_exclusive(), Some(date(2020, 2, 4)));
        let result = split(&data, &season, &axis).unwrap();
        assert!(result.forecast_visible);
    }

    #[test]
    fn test_forecast_after_axis_is_hidden() {
        let data = dataset(Some(date(2020, 2, 5)));
        let season = SeasonContext::new(2020, date(2020, 1, 10)).unwrap();
        // axis end Feb 4, forecast starts a day later
        let axis = bounds(&season, 34).unwrap();
        let result = split(&data, &season, &axis).unwrap();
        assert!(!result.forecast_visible);
    }

    #[test]
    fn test_forecast_on_november_1_is_hidden() {
        let data = dataset(Some(date(2020, 11, 1)));
        let season = SeasonContext::new(2020, date(2020, 1, 10)).unwrap();
        // axis end clamps to Nov 1, the season check still hides it
        let axis = bounds(&season, 366).unwrap();
        assert_eq!(axis.end_exclusive(), Some(date(2020, 11, 1)));
        assert!(!split(&data, &season, &axis).unwrap().forecast_visible);
    }

    #[test]
    fn test_forecast_after_season_is_hidden() {
        let data = dataset(Some(date(2020, 11, 2)));
        let season = SeasonContext::new(2020, date(2020, 1, 10)).unwrap();
        let axis = AxisBounds {
            min: season.planting_date,
            max: date(2020, 12, 31),
        };
        assert!(!split(&data, &season, &axis).unwrap().forecast_visible);
    }

    #[test]
    fn test_forecast_before_planting_date_is_clamped() {
        let data = dataset(Some(date(2020, 2, 4)));
        let season = SeasonContext::new(2020, date(2020, 2, 6)).unwrap();
        let axis = bounds(&season, data.observed_len()).unwrap();
        let result = split(&data, &season, &axis).unwrap();
        assert_eq!(result.split_index, -3);

        let series = align(&data, View::SeasonToDate, season.planting_date).unwrap();
        assert_eq!(series.year_to_date, vec![0.0, 10.0, 20.0, 30.0]);
        let segments = result.segments(&series.year_to_date);
        assert!(segments.observed.is_empty());
        assert_eq!(
            segments.forecast,
            vec![None, Some(0.0), Some(10.0), Some(20.0), Some(30.0)]
        );
        assert_eq!(
            segments.forecast_start(&season.planting_date).unwrap(),
            date(2020, 2, 5)
        );
    }

    #[test]
    fn test_split_past_series_end_is_clamped() {
        let result = ForecastSplit {
            split_index: 50,
            forecast_visible: false,
            first_forecast_date: Some(date(2020, 3, 1)),
        };
        let segments = result.segments(&[0.0, 1.0, 2.0]);
        assert_eq!(segments.observed, vec![0.0, 1.0, 2.0]);
        assert!(segments.forecast.is_empty());
    }
}
