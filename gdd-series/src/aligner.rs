use chrono::{Datelike, NaiveDate};
use gdd_season::dataset::RawThresholdDataset;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which chart the series are computed for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// "Current Conditions": every series stops one day short of its last raw value.
    FullSeason,
    /// "Season To Date": series run through their last raw value and the
    /// observed series is split into observed and forecast segments.
    #[default]
    SeasonToDate,
}

impl View {
    /// Chart heading for the season year, e.g. "2020 Season To Date".
    pub fn title(&self, year: i32) -> String {
        match self {
            View::FullSeason => format!("{year} Current Conditions"),
            View::SeasonToDate => format!("{year} Season To Date"),
        }
    }

    /// Legend name of the observed series in this view.
    pub fn observed_label(&self) -> &'static str {
        match self {
            View::FullSeason => "Year to Date",
            View::SeasonToDate => "Season to Date",
        }
    }

    /// Whether the observed series is split at the first forecast day.
    pub fn splits_forecast(&self) -> bool {
        matches!(self, View::SeasonToDate)
    }
}

/// The planting date's index is past the end of a raw sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    PlantingDateOutOfRange {
        series: &'static str,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::PlantingDateOutOfRange { series, index, len } => write!(
                f,
                "planting date index {index} is beyond the {len} days of '{series}' data"
            ),
        }
    }
}

impl std::error::Error for AlignError {}

/// Series re-indexed so element 0 is the planting date, each zeroed at that day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub year_to_date: Vec<f64>,
    pub recent: Vec<f64>,
    pub normal: Vec<f64>,
    /// Period of record minimum: baselined average times the min ratio.
    pub por_min: Vec<f64>,
    /// Period of record maximum: baselined average times the max ratio.
    pub por_max: Vec<f64>,
    /// `(por_min[i], por_max[i])` pairs for a range band.
    pub por: Vec<(f64, f64)>,
}

/// Slice `values` from the planting index per the view and subtract the
/// value at the planting date from every element.
fn baselined(
    values: &[f64],
    start: usize,
    view: View,
    series: &'static str,
) -> Result<Vec<f64>, AlignError> {
    let base = *values.get(start).ok_or(AlignError::PlantingDateOutOfRange {
        series,
        index: start,
        len: values.len(),
    })?;
    Ok(sliced(values, start, view)
        .iter()
        .map(|value| value - base)
        .collect())
}

/// `values[start..]`, minus the final element for the full season view.
/// Callers guarantee `start < values.len()`.
fn sliced(values: &[f64], start: usize, view: View) -> &[f64] {
    let end = match view {
        View::FullSeason => values.len() - 1,
        View::SeasonToDate => values.len(),
    };
    &values[start..end]
}

fn ratios<'a>(
    values: &'a [f64],
    start: usize,
    view: View,
    series: &'static str,
) -> Result<&'a [f64], AlignError> {
    if start >= values.len() {
        return Err(AlignError::PlantingDateOutOfRange {
            series,
            index: start,
            len: values.len(),
        });
    }
    Ok(sliced(values, start, view))
}

/// Align a raw dataset at the planting date for the given view.
///
/// Each series is baselined against its own value on the planting date. The
/// period of record envelope multiplies the baselined average by the raw,
/// unbaselined ratio sequences; it is as long as the shortest of the three.
/// A planting date past the end of any sequence is an error.
pub fn align(
    dataset: &RawThresholdDataset,
    view: View,
    planting_date: NaiveDate,
) -> Result<DerivedSeries, AlignError> {
    let start = planting_date.ordinal0() as usize;

    let year_to_date = baselined(&dataset.observed, start, view, "obs")?;
    let recent = baselined(&dataset.recent_average, start, view, "recent")?;
    let normal = baselined(&dataset.normal, start, view, "normal")?;
    let avg = baselined(&dataset.all_time_average, start, view, "avg")?;
    let min_ratio = ratios(&dataset.all_time_min_ratio, start, view, "min")?;
    let max_ratio = ratios(&dataset.all_time_max_ratio, start, view, "max")?;

    let por: Vec<(f64, f64)> = avg
        .iter()
        .zip(min_ratio.iter().zip(max_ratio))
        .map(|(v, (lo, hi))| (v * lo, v * hi))
        .collect();
    let (por_min, por_max): (Vec<f64>, Vec<f64>) = por.iter().copied().unzip();

    debug!(
        "aligned {:?} at {} (index {}): {} observed, {} climatology days",
        view,
        planting_date,
        start,
        year_to_date.len(),
        recent.len()
    );

    Ok(DerivedSeries {
        year_to_date,
        recent,
        normal,
        por_min,
        por_max,
        por,
    })
}
