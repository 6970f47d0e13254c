//! One entry point that recomputes everything a GDD chart displays.
//!
//! A [`SeasonChart`] is the input set (threshold, planting date, view). The
//! caller keeps the last one it rendered and calls [`SeasonChart::compute`]
//! again whenever the input set or the payload changes; identical inputs
//! always produce an identical [`ChartModel`].

use crate::aligner::{align, AlignError, DerivedSeries, View};
use crate::axis::{bounds, AxisBounds};
use crate::forecast::{split, ForecastSplit, SplitSeries};
use chrono::NaiveDate;
use gdd_season::{
    dataset::{GddPayload, RawThresholdDataset},
    date_range::DateRange,
    error::SeasonError,
    season::SeasonContext,
    threshold::GddThreshold,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FORECAST_LABEL: &str = "6 Day Forecast";
pub const RECENT_LABEL: &str = "15 Year Average";
pub const NORMAL_LABEL: &str = "30 Year \"Normal\"";
pub const POR_LABEL: &str = "Period of Record";

/// Errors from computing a chart model.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    Season(SeasonError),
    Align(AlignError),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::Season(e) => write!(f, "{e}"),
            ChartError::Align(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<SeasonError> for ChartError {
    fn from(value: SeasonError) -> Self {
        ChartError::Season(value)
    }
}

impl From<AlignError> for ChartError {
    fn from(value: AlignError) -> Self {
        ChartError::Align(value)
    }
}

/// The inputs a chart is recomputed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeasonChart {
    pub threshold: GddThreshold,
    pub planting_date: NaiveDate,
    pub view: View,
}

impl SeasonChart {
    pub fn new(threshold: GddThreshold, planting_date: NaiveDate, view: View) -> SeasonChart {
        SeasonChart {
            threshold,
            planting_date,
            view,
        }
    }

    /// Compute the chart for this input set from a location's payload.
    pub fn compute(&self, payload: &GddPayload) -> Result<ChartModel, ChartError> {
        let dataset = payload.dataset(self.threshold)?;
        self.compute_dataset(dataset)
    }

    /// Compute the chart from the dataset of the selected threshold.
    pub fn compute_dataset(&self, dataset: &RawThresholdDataset) -> Result<ChartModel, ChartError> {
        let season = SeasonContext::from_planting_date(self.planting_date)?;
        let series = align(dataset, self.view, self.planting_date)?;
        let axis = bounds(&season, dataset.observed_len())?;
        let (forecast, segments) = if self.view.splits_forecast() {
            let forecast = split(dataset, &season, &axis)?;
            let segments = forecast.segments(&series.year_to_date);
            (Some(forecast), Some(segments))
        } else {
            (None, None)
        };
        debug!(
            "computed {} {:?} chart from {} to {}",
            self.threshold, self.view, axis.min, axis.max
        );
        Ok(ChartModel {
            threshold: self.threshold,
            view: self.view,
            season,
            title: self.threshold.chart_title(),
            heading: self.view.title(season.year),
            series,
            axis,
            forecast,
            segments,
        })
    }
}

/// Everything a chart renderer needs, independent of the rendering library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub threshold: GddThreshold,
    pub view: View,
    pub season: SeasonContext,
    pub title: String,
    pub heading: String,
    pub series: DerivedSeries,
    pub axis: AxisBounds,
    /// Only present for the season to date view.
    pub forecast: Option<ForecastSplit>,
    /// Observed/forecast segments of `series.year_to_date`, season to date view only.
    pub segments: Option<SplitSeries>,
}

/// One displayed day with every series' value on that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub date: NaiveDate,
    /// Observed accumulation; named after the series it comes from.
    #[serde(rename = "year_to_date")]
    pub observed: Option<f64>,
    pub forecast: Option<f64>,
    pub recent: Option<f64>,
    pub normal: Option<f64>,
    pub por_min: Option<f64>,
    pub por_max: Option<f64>,
}

impl ChartModel {
    fn row(&self, offset: usize, date: NaiveDate) -> ChartRow {
        let (observed, forecast) = match &self.segments {
            Some(segments) => {
                let forecast_index = offset as i64 - segments.forecast_offset;
                let forecast = usize::try_from(forecast_index)
                    .ok()
                    .and_then(|i| segments.forecast.get(i).copied().flatten());
                (segments.observed.get(offset).copied(), forecast)
            }
            None => (self.series.year_to_date.get(offset).copied(), None),
        };
        ChartRow {
            date,
            observed,
            forecast,
            recent: self.series.recent.get(offset).copied(),
            normal: self.series.normal.get(offset).copied(),
            por_min: self.series.por_min.get(offset).copied(),
            por_max: self.series.por_max.get(offset).copied(),
        }
    }

    /// One row per day on the axis, from the planting date through `axis.max`.
    pub fn rows(&self) -> Vec<ChartRow> {
        let range = DateRange(self.axis.min, self.axis.max);
        let mut rows = Vec::with_capacity(range.len_days());
        rows.extend(
            range
                .enumerate()
                .map(|(offset, date)| self.row(offset, date)),
        );
        rows
    }

    /// Values on a single displayed date, or `None` off the axis.
    pub fn summary(&self, date: NaiveDate) -> Option<DaySummary> {
        if !self.axis.contains(&date) {
            return None;
        }
        let offset = (date - self.axis.min).num_days() as usize;
        let row = self.row(offset, date);
        let mut values = Vec::new();
        if let Some(v) = row.observed {
            values.push((self.view.observed_label().to_string(), v));
        }
        if let Some(v) = row.forecast {
            values.push((FORECAST_LABEL.to_string(), v));
        }
        if let Some(v) = row.recent {
            values.push((RECENT_LABEL.to_string(), v));
        }
        if let Some(v) = row.normal {
            values.push((NORMAL_LABEL.to_string(), v));
        }
        let period_of_record = row.por_min.zip(row.por_max);
        Some(DaySummary {
            date,
            values,
            period_of_record,
        })
    }
}

/// Values on one date, formatted like a chart tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// (series name, value) for each series with data on this date.
    pub values: Vec<(String, f64)>,
    pub period_of_record: Option<(f64, f64)>,
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%b %d, %Y"))?;
        for (name, value) in &self.values {
            write!(f, "\n{value:.0} : {name}")?;
        }
        if let Some((lo, hi)) = self.period_of_record {
            write!(f, "\n{lo:.0}-{hi:.0} : {POR_LABEL}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartError, SeasonChart};
    use crate::aligner::{AlignError, View};
    use chrono::NaiveDate;
    use gdd_season::{
        dataset::{GddPayload, RawThresholdDataset},
        date_range::DateRange,
        error::SeasonError,
        threshold::GddThreshold,
    };
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 2020 payload: observed Jan 1 - Feb 9 with a forecast from Feb 4.
    fn payload() -> GddPayload {
        let climatology: Vec<f64> = (0..366).map(|i| (i * 9) as f64).collect();
        let dataset = RawThresholdDataset {
            observed: (0..40).map(|i| (i * 10) as f64).collect(),
            recent_average: climatology.clone(),
            normal: climatology.clone(),
            all_time_average: climatology,
            all_time_min_ratio: vec![0.5; 366],
            all_time_max_ratio: vec![1.5; 366],
            first_forecast_date: Some(date(2020, 2, 4)),
        };
        GddPayload(BTreeMap::from([("gdd50".to_string(), dataset)]))
    }

    #[test]
    fn test_season_to_date_model() {
        let chart = SeasonChart::new(GddThreshold::Base50, date(2020, 1, 10), View::SeasonToDate);
        let model = chart.compute(&payload()).unwrap();
        assert_eq!(model.title, "Cumulative Base 50 Growing Degree Days");
        assert_eq!(model.heading, "2020 Season To Date");
        assert_eq!(model.axis.min, date(2020, 1, 10));
        assert_eq!(model.axis.max, date(2020, 2, 9));
        let forecast = model.forecast.unwrap();
        assert_eq!(forecast.split_index, 24);
        assert!(forecast.forecast_visible);

        let rows = model.rows();
        assert_eq!(rows.len(), 31);
        assert_eq!(rows[0].date, date(2020, 1, 10));
        assert_eq!(rows[0].observed, Some(0.0));
        assert_eq!(rows[2].recent, Some(18.0));
        assert_eq!(rows[2].por_min, Some(9.0));
        assert_eq!(rows[2].por_max, Some(27.0));
        // Feb 3: last observed day, forecast gap
        assert_eq!(rows[24].observed, Some(240.0));
        assert_eq!(rows[24].forecast, None);
        // Feb 4: first forecast day
        assert_eq!(rows[25].observed, None);
        assert_eq!(rows[25].forecast, Some(250.0));
        assert_eq!(rows[30].date, date(2020, 2, 9));
        assert_eq!(rows[30].forecast, Some(300.0));
    }

    #[test]
    fn test_full_season_model() {
        let chart = SeasonChart::new(GddThreshold::Base50, date(2020, 1, 10), View::FullSeason);
        let model = chart.compute(&payload()).unwrap();
        assert_eq!(model.heading, "2020 Current Conditions");
        assert!(model.forecast.is_none());
        assert!(model.segments.is_none());

        let rows = model.rows();
        assert_eq!(rows.len(), 31);
        assert_eq!(rows[29].observed, Some(290.0));
        assert_eq!(rows[29].forecast, None);
        // last raw point is dropped in this view
        assert_eq!(rows[30].observed, None);
        assert_eq!(rows[30].recent, Some(270.0));
    }

    #[test]
    fn test_summary_formatting() {
        let chart = SeasonChart::new(GddThreshold::Base50, date(2020, 1, 10), View::SeasonToDate);
        let model = chart.compute(&payload()).unwrap();

        let observed = model.summary(date(2020, 1, 12)).unwrap();
        assert_eq!(
            observed.to_string(),
            "Jan 12, 2020\n20 : Season to Date\n18 : 15 Year Average\n18 : 30 Year \"Normal\"\n9-27 : Period of Record"
        );

        let forecast = model.summary(date(2020, 2, 5)).unwrap();
        assert_eq!(
            forecast.to_string(),
            "Feb 05, 2020\n260 : 6 Day Forecast\n234 : 15 Year Average\n234 : 30 Year \"Normal\"\n117-351 : Period of Record"
        );

        assert!(model.summary(date(2020, 1, 9)).is_none());
        assert!(model.summary(date(2020, 2, 10)).is_none());
    }

    #[test]
    fn test_recompute_is_referentially_transparent() {
        let data = payload();
        let chart = SeasonChart::new(GddThreshold::Base50, date(2020, 1, 10), View::SeasonToDate);
        assert_eq!(chart.compute(&data).unwrap(), chart.compute(&data).unwrap());

        let moved = SeasonChart {
            planting_date: date(2020, 1, 20),
            ..chart
        };
        assert_ne!(moved, chart);
        let model = moved.compute(&data).unwrap();
        assert_eq!(model.axis.min, date(2020, 1, 20));
        assert_eq!(model.series.year_to_date[0], 0.0);
    }

    #[test]
    fn test_compute_errors() {
        let data = payload();
        let missing = SeasonChart::new(GddThreshold::Base8650, date(2020, 1, 10), View::SeasonToDate);
        assert_eq!(
            missing.compute(&data),
            Err(ChartError::Season(SeasonError::MissingThreshold(
                "gdd8650".to_string()
            )))
        );

        let late = SeasonChart::new(GddThreshold::Base50, date(2020, 3, 1), View::SeasonToDate);
        assert_eq!(
            late.compute(&data),
            Err(ChartError::Align(AlignError::PlantingDateOutOfRange {
                series: "obs",
                index: 60,
                len: 40
            }))
        );

        let off_season = SeasonChart::new(GddThreshold::Base50, date(2020, 11, 15), View::SeasonToDate);
        assert!(matches!(
            off_season.compute(&data),
            Err(ChartError::Season(SeasonError::PlantingDateOutsideSeason { .. }))
        ));
    }

    #[test]
    fn test_model_serializes_for_renderer() {
        let chart = SeasonChart::new(GddThreshold::Base50, date(2020, 1, 10), View::SeasonToDate);
        let model = chart.compute(&payload()).unwrap();
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["threshold"], "gdd50");
        assert_eq!(json["view"], "season-to-date");
        assert_eq!(json["axis"]["max"], "2020-02-09");
        assert_eq!(json["series"]["por"][1][1], 13.5);
        assert!(json["segments"]["forecast"][0].is_null());

        let row = serde_json::to_value(&model.rows()[0]).unwrap();
        assert_eq!(row["year_to_date"], 0.0);
        assert!(row.get("observed").is_none());
    }

    #[test]
    fn test_rows_cover_axis_days() {
        for (view, planting_date) in [
            (View::SeasonToDate, date(2020, 1, 1)),
            (View::SeasonToDate, date(2020, 2, 9)),
            (View::FullSeason, date(2020, 1, 25)),
        ] {
            let chart = SeasonChart::new(GddThreshold::Base50, planting_date, view);
            let model = chart.compute(&payload()).unwrap();
            let days = DateRange(model.axis.min, model.axis.max).len_days();
            let rows = model.rows();
            assert_eq!(rows.len(), days);
            assert_eq!(rows.first().map(|r| r.date), Some(model.axis.min));
            assert_eq!(rows.last().map(|r| r.date), Some(model.axis.max));
        }
    }
}
