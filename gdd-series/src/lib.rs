//! Series computation for growing degree day charts.
//!
//! This crate turns raw Jan 1-indexed daily series into what a chart
//! displays: cumulative series baselined at the planting date, the period
//! of record envelope, the observed/forecast split, and the date axis.

pub mod aligner;
pub mod axis;
pub mod chart;
pub mod forecast;

pub use aligner::{align, AlignError, DerivedSeries, View};
pub use axis::{bounds, AxisBounds};
pub use chart::{ChartError, ChartModel, ChartRow, DaySummary, SeasonChart};
pub use forecast::{split, ForecastSplit, SplitSeries};
