//! Data models for the MeteoBot application
//!
//! This module contains the core domain models organized by concern:
//! - Location: IPMA district/island directory entries
//! - Forecast: raw per-day forecast records and classification tables
//! - Summary: the normalized per-day forecast shape consumed downstream

pub mod forecast;
pub mod location;
pub mod summary;

// Re-export all public types for convenient access
pub use forecast::{PrecipitationClass, RawForecastDay, WeatherType};
pub use location::Location;
pub use summary::DaySummary;
