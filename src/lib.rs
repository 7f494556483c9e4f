//! `MeteoBot` - conversational weather assistant for Portuguese locations
//!
//! This library provides the core functionality for resolving weather
//! intents from free-form chat messages, aggregating IPMA open-data
//! forecasts, and assembling prose, chart and map responses.

pub mod assemble;
pub mod config;
pub mod directory;
pub mod error;
pub mod intent;
pub mod ipma;
pub mod models;
pub mod narrative;
pub mod render;
pub mod web;

// Re-export core types for public API
pub use assemble::{ChatResponse, Pipeline, ResponsePlan};
pub use config::MeteoBotConfig;
pub use error::MeteoBotError;
pub use intent::IntentFlags;
pub use ipma::{Datasets, IpmaClient};
pub use models::{DaySummary, Location};
pub use narrative::{NarrativeBackend, OllamaClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MeteoBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
