//! Normalized per-day forecast summaries
//!
//! [`DaySummary`] is the unit consumed by the chart, map and narrative
//! stages. It is derived deterministically from one raw forecast day plus
//! the two classification tables; lookup misses degrade to placeholders,
//! never to errors.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{PrecipitationClass, RawForecastDay, WeatherType};

/// Placeholder for weather-type codes missing from the classification table
pub const UNKNOWN_WEATHER: &str = "Desconhecido";

/// Placeholder for absent or unclassifiable precipitation data
pub const NO_PRECIPITATION_DATA: &str = "Sem dados";

/// Human-readable representation of one day's forecast for one location
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temp_min: String,
    pub temp_max: String,
    pub wind_direction: String,
    pub weather_description: String,
    pub precipitation_description: String,
    pub precipitation_probability: String,
    pub emoji: String,
}

impl DaySummary {
    /// Join one raw day against the classification tables.
    ///
    /// Pure and total: unknown weather-type codes map to
    /// [`UNKNOWN_WEATHER`], missing precipitation codes to
    /// [`NO_PRECIPITATION_DATA`], a missing probability to `"0"` and an
    /// unmapped description to an empty emoji.
    #[must_use]
    pub fn from_raw(
        day: &RawForecastDay,
        weather_types: &[WeatherType],
        precipitation_classes: &[PrecipitationClass],
    ) -> Self {
        let weather_description = weather_types
            .iter()
            .find(|entry| entry.id == day.id_weather_type)
            .map_or(UNKNOWN_WEATHER, |entry| entry.description.as_str())
            .to_string();

        let precipitation_description = day
            .class_prec_int
            .as_deref()
            .map_or(NO_PRECIPITATION_DATA, |code| {
                precipitation_classes
                    .iter()
                    .find(|entry| entry.class == code)
                    .map_or(NO_PRECIPITATION_DATA, |entry| entry.description.as_str())
            })
            .to_string();

        let precipitation_probability = day
            .precita_prob
            .clone()
            .or_else(|| day.precipita_prob.clone())
            .unwrap_or_else(|| "0".to_string());

        let emoji = emoji_for(&weather_description).to_string();

        Self {
            date: day.forecast_date,
            temp_min: day.t_min.clone(),
            temp_max: day.t_max.clone(),
            wind_direction: day.wind_dir.clone(),
            weather_description,
            precipitation_description,
            precipitation_probability,
            emoji,
        }
    }
}

/// Map an IPMA weather description to an emoji glyph.
///
/// Approximation layer over the Portuguese description strings; new or
/// unknown descriptions yield an empty glyph rather than failing.
#[must_use]
pub fn emoji_for(description: &str) -> &'static str {
    match description {
        "Céu limpo" => "☀️",
        "Céu pouco nublado" => "⛅",
        "Céu parcialmente nublado" => "⛅",
        "Céu muito nublado ou encoberto" => "☁️",
        "Céu nublado por nuvens altas" => "☁️",
        "Céu com períodos de muito nublado" => "☁️",
        "Céu nublado" => "☁️",
        "Aguaceiros/chuva" => "🌧️",
        "Aguaceiros/chuva fracos" => "🌦️",
        "Aguaceiros/chuva fortes" => "⛈️",
        "Chuva/aguaceiros" => "🌧️",
        "Chuva fraca ou chuvisco" => "🌦️",
        "Chuva/aguaceiros forte" => "⛈️",
        "Períodos de chuva" => "🌧️",
        "Períodos de chuva fraca" => "🌦️",
        "Períodos de chuva forte" => "⛈️",
        "Chuvisco" => "🌦️",
        "Neblina" => "🌫️",
        "Nevoeiro ou nuvens baixas" => "🌫️",
        "Nevoeiro" => "🌫️",
        "Neve" => "❄️",
        "Aguaceiros de neve" => "🌨️",
        "Chuva e Neve" => "🌨️",
        "Trovoada" => "⛈️",
        "Aguaceiros e possibilidade de trovoada" => "⛈️",
        "Chuva e possibilidade de trovoada" => "⛈️",
        "Granizo" => "🌨️",
        "Geada" => "🧊",
        "Nebulosidade convectiva" => "☁️",
        _ => "",
    }
}
