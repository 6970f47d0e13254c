//! Climate Smart Farming data service: request URL and response decoding.

use crate::dataset::GddPayload;

#[cfg(feature = "api")]
use log::{info, warn};
#[cfg(feature = "api")]
use reqwest::{Client, StatusCode};

/// Base URL of the per-location, per-year GDD data endpoint.
pub const DATA_SERVICE_URL: &str = "http://tools.climatesmartfarming.org/tstctool/data/";

/// Request URL for a location's payload for one season year.
pub fn data_url(lat: f64, lon: f64, year: i32) -> String {
    format!("{DATA_SERVICE_URL}?lat={lat}&lon={lon}&year={year}")
}

/// Strip a JSONP callback wrapper (`callback({...});`) if present.
pub fn strip_jsonp(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.starts_with('{') {
        return trimmed;
    }
    match (trimmed.find('('), trimmed.rfind(')')) {
        (Some(open), Some(close)) if open < close => trimmed[open + 1..close].trim(),
        _ => trimmed,
    }
}

/// Decode a response body (plain JSON or JSONP) into a payload.
pub fn decode_payload(body: &str) -> anyhow::Result<GddPayload> {
    Ok(GddPayload::from_json(strip_jsonp(body))?)
}

/// Fetch the payload for a location and season year. One attempt only;
/// retrying is left to the caller.
#[cfg(feature = "api")]
pub async fn fetch_payload(client: &Client, lat: f64, lon: f64, year: i32) -> anyhow::Result<GddPayload> {
    let url = data_url(lat, lon, year);
    info!("Fetching GDD data: {}", url);
    let response = client.get(&url).send().await?;
    if response.status() != StatusCode::OK {
        warn!("Bad response status for {}: {}", url, response.status());
        anyhow::bail!("data service returned {}", response.status());
    }
    let body = response.text().await?;
    if body.len() <= 2 {
        anyhow::bail!("empty response from data service for {}", url);
    }
    decode_payload(&body)
}
