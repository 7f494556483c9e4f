//! Configuration management for `MeteoBot`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::MeteoBotError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `MeteoBot` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeteoBotConfig {
    /// IPMA open-data API configuration
    #[serde(default)]
    pub ipma: IpmaConfig,
    /// Narrative backend configuration
    #[serde(default)]
    pub narrative: NarrativeConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// IPMA open-data API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpmaConfig {
    /// Base URL for the IPMA open-data API
    #[serde(default = "default_ipma_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_ipma_timeout")]
    pub timeout_seconds: u32,
}

/// Narrative backend (Ollama-compatible) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Base URL of the generation endpoint
    #[serde(default = "default_narrative_base_url")]
    pub base_url: String,
    /// Model name passed to the generation endpoint
    #[serde(default = "default_narrative_model")]
    pub model: String,
    /// Request timeout in seconds (generation is slow on local models)
    #[serde(default = "default_narrative_timeout")]
    pub timeout_seconds: u32,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Concurrent aggregation width for the all-cities branch
    #[serde(default = "default_fan_out")]
    pub all_cities_fan_out: usize,
}

// Default value functions
fn default_ipma_base_url() -> String {
    "https://api.ipma.pt/open-data".to_string()
}

fn default_ipma_timeout() -> u32 {
    30
}

fn default_narrative_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_narrative_model() -> String {
    "mistral".to_string()
}

fn default_narrative_timeout() -> u32 {
    120
}

fn default_server_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fan_out() -> usize {
    4
}

impl Default for IpmaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ipma_base_url(),
            timeout_seconds: default_ipma_timeout(),
        }
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            base_url: default_narrative_base_url(),
            model: default_narrative_model(),
            timeout_seconds: default_narrative_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            all_cities_fan_out: default_fan_out(),
        }
    }
}

impl MeteoBotConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with METEOBOT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("METEOBOT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: MeteoBotConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meteobot").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        for (name, url) in [
            ("IPMA base URL", &self.ipma.base_url),
            ("Narrative base URL", &self.narrative.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(MeteoBotError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.ipma.timeout_seconds == 0 || self.ipma.timeout_seconds > 300 {
            return Err(
                MeteoBotError::config("IPMA timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.narrative.timeout_seconds == 0 || self.narrative.timeout_seconds > 600 {
            return Err(MeteoBotError::config(
                "Narrative timeout must be between 1 and 600 seconds",
            )
            .into());
        }

        if self.defaults.all_cities_fan_out == 0 || self.defaults.all_cities_fan_out > 16 {
            return Err(
                MeteoBotError::config("All-cities fan-out must be between 1 and 16").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MeteoBotError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if self.narrative.model.trim().is_empty() {
            return Err(MeteoBotError::config("Narrative model name cannot be empty").into());
        }

        Ok(())
    }
}
