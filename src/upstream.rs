//! Upstream fetchers for the weather and flood APIs.
//!
//! Both requests run concurrently, each with its own timeout. Any failure
//! (transport, timeout, HTTP status, decode) is logged and reported as
//! [`Source::Absent`]. Nothing here retries.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{HydrologyPayload, Source, WeatherPayload};
use crate::Config;

// ---

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// HTTP client for both upstream APIs.
///
/// Cheap to clone; the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    // ---
    client: reqwest::Client,
    weather_url: String,
    flood_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl UpstreamClient {
    // ---
    pub fn new(config: &Config) -> Result<Self> {
        // ---
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            client,
            weather_url: config.weather_api_url.clone(),
            flood_url: config.flood_api_url.clone(),
            api_key: config.open_meteo_api_key.clone(),
            timeout: Duration::from_millis(u64::from(config.upstream_timeout_ms)),
        })
    }

    /// Fetch both payloads concurrently.
    pub async fn fetch_sources(
        &self,
        coords: Coordinates,
    ) -> (Source<WeatherPayload>, Source<HydrologyPayload>) {
        // ---
        let (weather, hydrology) =
            tokio::join!(self.fetch_weather(coords), self.fetch_hydrology(coords));

        (
            into_source("weather", weather),
            into_source("hydrology", hydrology),
        )
    }

    /// Fetch today's precipitation and hourly surface soil moisture.
    pub async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherPayload> {
        // ---
        let query = [
            ("daily", "precipitation_sum"),
            ("hourly", "soil_moisture_0_to_1cm"),
            ("timezone", "auto"),
            ("forecast_days", "1"),
        ];
        self.get_json(&self.weather_url, coords, &query).await
    }

    /// Fetch today's mean river discharge.
    pub async fn fetch_hydrology(&self, coords: Coordinates) -> Result<HydrologyPayload> {
        // ---
        let query = [("daily", "river_discharge_mean"), ("forecast_days", "1")];
        self.get_json(&self.flood_url, coords, &query).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        coords: Coordinates,
        query: &[(&str, &str)],
    ) -> Result<T> {
        // ---
        let start = Instant::now();
        debug!(
            "Fetching {} for ({}, {})",
            url, coords.latitude, coords.longitude
        );

        let mut request = self
            .client
            .get(url)
            .timeout(self.timeout)
            .query(&[("latitude", coords.latitude), ("longitude", coords.longitude)])
            .query(query);

        if let Some(key) = &self.api_key {
            request = request.query(&[("apikey", key.as_str())]);
        }

        let payload = request
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", url))?
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))?;

        debug!("Fetched {} in {}ms", url, start.elapsed().as_millis());
        Ok(payload)
    }
}

fn into_source<T>(name: &str, fetched: Result<T>) -> Source<T> {
    // ---
    match fetched {
        Ok(payload) => Source::Present(payload),
        Err(e) => {
            warn!("Using fallback data for {}: {:#}", name, e);
            Source::Absent
        }
    }
}
