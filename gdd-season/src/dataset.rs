use crate::{error::SeasonError, threshold::GddThreshold};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw daily series for one GDD threshold as delivered by the data service.
///
/// Every sequence is indexed from January 1 of the season year. `observed`
/// runs through the most recent available day and may end in a short
/// forecast tail starting at `first_forecast_date`; the climatology
/// sequences cover the whole calendar year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawThresholdDataset {
    /// Cumulative GDD observed this season (plus any forecast tail).
    #[serde(rename = "obs")]
    pub observed: Vec<f64>,
    /// 15 year average cumulative GDD.
    #[serde(rename = "recent")]
    pub recent_average: Vec<f64>,
    /// 30 year "normal" cumulative GDD.
    pub normal: Vec<f64>,
    /// Period of record average cumulative GDD.
    #[serde(rename = "avg")]
    pub all_time_average: Vec<f64>,
    /// Multiplier on the average giving the period of record minimum.
    #[serde(rename = "min")]
    pub all_time_min_ratio: Vec<f64>,
    /// Multiplier on the average giving the period of record maximum.
    #[serde(rename = "max")]
    pub all_time_max_ratio: Vec<f64>,
    /// First day of forecast data, `None` when the payload carries no forecast.
    #[serde(rename = "firstFcstDate", default, with = "forecast_date")]
    pub first_forecast_date: Option<NaiveDate>,
}

impl RawThresholdDataset {
    /// Number of days of observed (and forecast) data from Jan 1.
    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }

    /// The day before the first forecast day, if there is a forecast.
    pub fn last_observed_date(&self) -> Option<NaiveDate> {
        self.first_forecast_date.and_then(|date| date.pred_opt())
    }
}

/// `firstFcstDate` travels as "YYYY-MM-DD" or "" when there is no forecast.
mod forecast_date {
    use chrono::NaiveDate;
    use gdd_utils::dates::{format_date, parse_date};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.serialize_str(&format_date(date)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_date(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// A per-location, per-year payload: one dataset per threshold key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GddPayload(pub BTreeMap<String, RawThresholdDataset>);

impl GddPayload {
    /// Parse a payload from its JSON representation.
    pub fn from_json(json: &str) -> Result<GddPayload, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Dataset for the requested threshold.
    pub fn dataset(&self, threshold: GddThreshold) -> Result<&RawThresholdDataset, SeasonError> {
        self.0
            .get(threshold.key())
            .ok_or_else(|| SeasonError::MissingThreshold(threshold.key().to_string()))
    }

    /// Known thresholds present in this payload.
    pub fn thresholds(&self) -> Vec<GddThreshold> {
        GddThreshold::ALL
            .into_iter()
            .filter(|threshold| self.0.contains_key(threshold.key()))
            .collect()
    }
}
