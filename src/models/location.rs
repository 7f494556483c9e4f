//! Location model for IPMA district/island directory entries

use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the IPMA location directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Location name (district or island)
    #[serde(rename = "local")]
    pub name: String,
    /// Opaque identifier used to query forecast data
    #[serde(rename = "globalIdLocal")]
    pub global_id: i64,
    /// Latitude in decimal degrees (arrives as a JSON string upstream)
    #[serde(deserialize_with = "de_coordinate")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(deserialize_with = "de_coordinate")]
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, global_id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            global_id,
            latitude,
            longitude,
        }
    }
}

/// The directory feed serves coordinates as strings; tolerate both.
fn de_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_directory_entry() {
        let json = r#"{
            "local": "Porto",
            "globalIdLocal": 1131200,
            "latitude": "41.1580",
            "longitude": "-8.6294"
        }"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.name, "Porto");
        assert_eq!(location.global_id, 1131200);
        assert_eq!(location.latitude, 41.158);
        assert_eq!(location.longitude, -8.6294);
    }

    #[test]
    fn test_deserialize_numeric_coordinates() {
        let json = r#"{"local": "Faro", "globalIdLocal": 1080500, "latitude": 37.0146, "longitude": -7.9331}"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.latitude, 37.0146);
    }

    #[test]
    fn test_deserialize_bad_coordinate_fails() {
        let json = r#"{"local": "Faro", "globalIdLocal": 1080500, "latitude": "north", "longitude": "-7.9"}"#;
        assert!(serde_json::from_str::<Location>(json).is_err());
    }
}
