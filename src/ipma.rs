//! IPMA open-data API client
//!
//! One named fetch operation per upstream dataset, plus [`IpmaClient::gather`]
//! which runs the four fetches for a location as a structured concurrent
//! fan-out. Any single failure fails the whole aggregation; there is no
//! retry and no partial-result mode.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::IpmaConfig;
use crate::models::{Location, PrecipitationClass, RawForecastDay, WeatherType};
use crate::{MeteoBotError, Result};

/// Every IPMA payload wraps its records in a `data` array.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// The four datasets needed to answer one location's forecast
#[derive(Debug, Clone)]
pub struct Datasets {
    pub locations: Vec<Location>,
    pub forecast: Vec<RawForecastDay>,
    pub weather_types: Vec<WeatherType>,
    pub precipitation_classes: Vec<PrecipitationClass>,
}

/// HTTP client for the IPMA open-data API
#[derive(Debug, Clone)]
pub struct IpmaClient {
    client: reqwest::Client,
    base_url: String,
}

impl IpmaClient {
    /// Create a new client with the configured base URL and timeout.
    pub fn new(config: &IpmaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("meteobot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MeteoBotError::upstream(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{path}", self.base_url);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MeteoBotError::upstream(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeteoBotError::upstream(format!(
                "{url} returned HTTP {status}"
            )));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| MeteoBotError::upstream(format!("Invalid payload from {url}: {e}")))?;

        Ok(envelope.data)
    }

    /// Fetch the district/island location directory.
    #[instrument(skip(self))]
    pub async fn locations(&self) -> Result<Vec<Location>> {
        self.fetch("/distrits-islands.json").await
    }

    /// Fetch the daily forecast for one location.
    #[instrument(skip(self))]
    pub async fn forecast(&self, global_id: i64) -> Result<Vec<RawForecastDay>> {
        self.fetch(&format!("/forecast/meteorology/cities/daily/{global_id}.json"))
            .await
    }

    /// Fetch the weather-type classification table.
    #[instrument(skip(self))]
    pub async fn weather_types(&self) -> Result<Vec<WeatherType>> {
        self.fetch("/weather-type-classe.json").await
    }

    /// Fetch the precipitation-intensity classification table.
    #[instrument(skip(self))]
    pub async fn precipitation_classes(&self) -> Result<Vec<PrecipitationClass>> {
        self.fetch("/precipitation-classe.json").await
    }

    /// Fetch all four datasets for one location concurrently.
    ///
    /// The fetches are data-independent; the first failure cancels the
    /// rest and fails the aggregation.
    #[instrument(skip(self))]
    pub async fn gather(&self, global_id: i64) -> Result<Datasets> {
        let (locations, forecast, weather_types, precipitation_classes) = tokio::try_join!(
            self.locations(),
            self.forecast(global_id),
            self.weather_types(),
            self.precipitation_classes(),
        )?;

        info!(
            "Gathered {} forecast days for location {global_id}",
            forecast.len()
        );

        Ok(Datasets {
            locations,
            forecast,
            weather_types,
            precipitation_classes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data_array() {
        let json = r#"{"owner": "IPMA", "data": [
            {"local": "Porto", "globalIdLocal": 1131200, "latitude": "41.15", "longitude": "-8.62"}
        ]}"#;
        let envelope: Envelope<Location> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].name, "Porto");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = IpmaConfig {
            base_url: "https://api.ipma.pt/open-data/".to_string(),
            timeout_seconds: 30,
        };
        let client = IpmaClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.ipma.pt/open-data");
    }
}
