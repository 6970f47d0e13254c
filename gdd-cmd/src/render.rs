//! Render chart series and per-day summaries from a saved payload.

use crate::Format;
use chrono::{Local, NaiveDate};
use gdd_season::{
    dataset::GddPayload, season::resolve_planting_date, service::decode_payload,
    threshold::GddThreshold,
};
use gdd_series::{ChartModel, DaySummary, SeasonChart, View};
use gdd_utils::dates::{parse_date, parse_planting_date};
use log::{info, warn};
use std::io::Write;

/// Build the chart input set from command-line values.
pub fn chart_inputs(
    threshold: &str,
    planting_date: Option<&str>,
    view: View,
) -> anyhow::Result<SeasonChart> {
    let threshold: GddThreshold = threshold.parse()?;
    let planting_date = match planting_date {
        Some(s) => parse_planting_date(s)?,
        None => resolve_planting_date(None, Local::now().naive_local().date())?,
    };
    Ok(SeasonChart::new(threshold, planting_date, view))
}

/// Read a payload JSON (or JSONP) file.
pub fn load_payload(path: &str) -> anyhow::Result<GddPayload> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read payload {}: {}", path, e))?;
    decode_payload(&body)
}

/// Write a computed chart as CSV rows or as the JSON chart model.
pub fn write_chart<W: Write>(model: &ChartModel, format: Format, writer: W) -> anyhow::Result<()> {
    match format {
        Format::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            for row in model.rows() {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        Format::Json => serde_json::to_writer_pretty(writer, model)?,
    }
    Ok(())
}

/// Compute the chart for `chart` from the payload at `payload_path` and write it out.
pub fn run_render(
    payload_path: &str,
    chart: &SeasonChart,
    format: Format,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let payload = load_payload(payload_path)?;
    let model = chart.compute(&payload)?;
    info!(
        "{} / {}: {} to {}",
        model.title, model.heading, model.axis.min, model.axis.max
    );
    if let Some(forecast) = &model.forecast {
        if forecast.has_forecast() && !forecast.forecast_visible {
            warn!("Forecast starts outside the displayed range and is hidden");
        }
    }

    match output {
        Some(path) => {
            write_chart(&model, format, std::fs::File::create(path)?)?;
            info!("Render complete. Output: {}", path);
        }
        None => write_chart(&model, format, std::io::stdout().lock())?,
    }
    Ok(())
}

/// Summarize every series on `date` for the given chart.
pub fn summarize(payload: &GddPayload, chart: &SeasonChart, date: NaiveDate) -> anyhow::Result<DaySummary> {
    let model = chart.compute(payload)?;
    model.summary(date).ok_or_else(|| {
        anyhow::anyhow!(
            "{} is outside the displayed range {} to {}",
            date,
            model.axis.min,
            model.axis.max
        )
    })
}

pub fn run_summary(payload_path: &str, chart: &SeasonChart, date: &str) -> anyhow::Result<()> {
    let payload = load_payload(payload_path)?;
    let summary = summarize(&payload, chart, parse_date(date)?)?;
    println!("{summary}");
    Ok(())
}
