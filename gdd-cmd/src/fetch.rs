//! Download a location's GDD payload from the data service.

use chrono::Local;
use gdd_season::{season::latest_selectable_year, service::fetch_payload};
use log::info;

/// Fetch the payload for a location and write it to `output` as JSON.
///
/// The season defaults to the latest selectable one. A single request is
/// made; failures are reported, not retried.
pub async fn run_fetch(
    lat: f64,
    lon: f64,
    year: Option<i32>,
    output: &str,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let today = Local::now().naive_local().date();
    let year = year.unwrap_or_else(|| latest_selectable_year(today));

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?;

    info!("Fetching {} season for ({}, {})", year, lat, lon);
    let payload = fetch_payload(&client, lat, lon, year).await?;

    for threshold in payload.thresholds() {
        let dataset = payload.dataset(threshold)?;
        info!(
            "{}: {} days observed, forecast from {}",
            threshold.label(),
            dataset.observed_len(),
            dataset
                .first_forecast_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }

    let file = std::fs::File::create(output)?;
    serde_json::to_writer(file, &payload)?;
    info!("Fetch complete. Output: {}", output);
    Ok(())
}
