//! Narrative prose generation
//!
//! Builds the fixed European-Portuguese prompt from a day summary and
//! obtains conversational prose from an Ollama-compatible generation
//! endpoint. Backend failures are not recovered here; they propagate as
//! upstream-service errors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::NarrativeConfig;
use crate::models::DaySummary;
use crate::{MeteoBotError, Result};

/// A backend able to turn a prompt into conversational prose
pub trait NarrativeBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Ollama `/api/generate` client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new client with the configured endpoint, model and timeout.
    pub fn new(config: &NarrativeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| MeteoBotError::narrative(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

impl NarrativeBackend for OllamaClient {
    #[instrument(skip(self, prompt))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("POST {url} (model {})", self.model);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| MeteoBotError::narrative(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MeteoBotError::narrative(format!(
                "{url} returned HTTP {status}"
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| MeteoBotError::narrative(format!("Invalid payload from {url}: {e}")))?;

        Ok(body.response.trim().to_string())
    }
}

/// Build the generation prompt for one city's day summary.
#[must_use]
pub fn build_prompt(city: &str, today: &DaySummary) -> String {
    format!(
        "Cidade: {city}\n\
         Data: {date}\n\
         Tempo: {weather} {emoji}\n\
         Tª min: {temp_min}°C\n\
         Tª max: {temp_max}°C\n\
         Vento: {wind}\n\
         Precipitação: {precipitation}\n\
         Prob.: {probability}%\n\n\
         Responde em português europeu, de forma simpática.",
        date = today.date,
        weather = today.weather_description,
        emoji = today.emoji,
        temp_min = today.temp_min,
        temp_max = today.temp_max,
        wind = today.wind_direction,
        precipitation = today.precipitation_description,
        probability = today.precipitation_probability,
    )
}
