//! Raw IPMA forecast records and classification tables
//!
//! These structs mirror the upstream payloads closely; normalization into
//! [`DaySummary`](crate::models::DaySummary) happens in `models::summary`.
//! Classification codes drift between JSON strings and numbers across
//! datasets, so every code field is normalized to a `String` at the edge.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One day of the daily forecast feed for a single location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawForecastDay {
    #[serde(rename = "forecastDate")]
    pub forecast_date: NaiveDate,
    #[serde(rename = "tMin", deserialize_with = "de_code")]
    pub t_min: String,
    #[serde(rename = "tMax", deserialize_with = "de_code")]
    pub t_max: String,
    #[serde(rename = "predWindDir", default)]
    pub wind_dir: String,
    #[serde(rename = "idWeatherType")]
    pub id_weather_type: i64,
    #[serde(rename = "classPrecInt", default, deserialize_with = "de_opt_code")]
    pub class_prec_int: Option<String>,
    /// Precipitation probability under the feed's historical field name
    #[serde(rename = "precitaProb", default, deserialize_with = "de_opt_code")]
    pub precita_prob: Option<String>,
    /// Precipitation probability under the feed's corrected field name
    #[serde(rename = "precipitaProb", default, deserialize_with = "de_opt_code")]
    pub precipita_prob: Option<String>,
}

/// One row of the weather-type classification table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherType {
    #[serde(rename = "idWeatherType")]
    pub id: i64,
    #[serde(rename = "descWeatherTypePT")]
    pub description: String,
}

/// One row of the precipitation-intensity classification table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecipitationClass {
    #[serde(rename = "classPrecInt", deserialize_with = "de_code")]
    pub class: String,
    #[serde(rename = "descClassPrecIntPT")]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CodeRepr {
    fn into_string(self) -> String {
        match self {
            CodeRepr::Int(value) => value.to_string(),
            CodeRepr::Float(value) => value.to_string(),
            CodeRepr::Text(text) => text,
        }
    }
}

fn de_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(CodeRepr::deserialize(deserializer)?.into_string())
}

fn de_opt_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CodeRepr>::deserialize(deserializer)?.map(CodeRepr::into_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_forecast_day() {
        let json = r#"{
            "forecastDate": "2026-08-07",
            "tMin": "16.2",
            "tMax": "24.9",
            "predWindDir": "NW",
            "idWeatherType": 3,
            "classPrecInt": "1",
            "precipitaProb": "12.0"
        }"#;
        let day: RawForecastDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.forecast_date, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
        assert_eq!(day.t_min, "16.2");
        assert_eq!(day.id_weather_type, 3);
        assert_eq!(day.class_prec_int.as_deref(), Some("1"));
        assert_eq!(day.precita_prob, None);
        assert_eq!(day.precipita_prob.as_deref(), Some("12.0"));
    }

    #[test]
    fn test_deserialize_numeric_codes() {
        // Some feed revisions serve codes and temperatures as numbers
        let json = r#"{
            "forecastDate": "2026-08-07",
            "tMin": 16,
            "tMax": 24.9,
            "predWindDir": "N",
            "idWeatherType": 2,
            "classPrecInt": 2,
            "precitaProb": 55
        }"#;
        let day: RawForecastDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.t_min, "16");
        assert_eq!(day.t_max, "24.9");
        assert_eq!(day.class_prec_int.as_deref(), Some("2"));
        assert_eq!(day.precita_prob.as_deref(), Some("55"));
    }

    #[test]
    fn test_deserialize_missing_optional_fields() {
        let json = r#"{
            "forecastDate": "2026-08-08",
            "tMin": "15.0",
            "tMax": "22.0",
            "idWeatherType": 1
        }"#;
        let day: RawForecastDay = serde_json::from_str(json).unwrap();
        assert!(day.wind_dir.is_empty());
        assert_eq!(day.class_prec_int, None);
        assert_eq!(day.precita_prob, None);
        assert_eq!(day.precipita_prob, None);
    }

    #[test]
    fn test_deserialize_classification_rows() {
        let weather: WeatherType =
            serde_json::from_str(r#"{"idWeatherType": 1, "descWeatherTypePT": "Céu limpo"}"#)
                .unwrap();
        assert_eq!(weather.id, 1);
        assert_eq!(weather.description, "Céu limpo");

        let precip: PrecipitationClass =
            serde_json::from_str(r#"{"classPrecInt": 2, "descClassPrecIntPT": "Moderado"}"#)
                .unwrap();
        assert_eq!(precip.class, "2");
        assert_eq!(precip.description, "Moderado");
    }
}
