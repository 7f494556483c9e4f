//! Leaflet map fragments
//!
//! A single-location map centered on the city, and a national overview
//! map with one marker per directory entry. Directory order drives marker
//! order so the overview is deterministic.

use std::collections::HashMap;

use crate::models::{DaySummary, Location};
use crate::render::{fragment_id, js_string};

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Mainland Portugal viewport for the overview map
const NATIONAL_CENTER: (f64, f64) = (39.5, -8.0);
const NATIONAL_ZOOM: u8 = 7;
const CITY_ZOOM: u8 = 10;

/// Render a map centered on one location with an opened popup.
#[must_use]
pub fn location_map(latitude: f64, longitude: f64, popup: &str) -> String {
    let id = fragment_id("map");
    let popup = js_string(popup);

    format!(
        "<div id=\"{id}\" style=\"height:300px;\"></div>\n\
         <script>\n\
           (function() {{\n\
             var map = L.map('{id}').setView([{latitude}, {longitude}], {CITY_ZOOM});\n\
             L.tileLayer('{TILE_URL}', {{\n\
               attribution: '{TILE_ATTRIBUTION}'\n\
             }}).addTo(map);\n\
             L.marker([{latitude}, {longitude}])\n\
               .addTo(map)\n\
               .bindPopup({popup})\n\
               .openPopup();\n\
           }})();\n\
         </script>\n"
    )
}

/// Render the national overview map with one marker per location.
///
/// Locations without a computed summary get a name-only popup; they are
/// never dropped from the map.
#[must_use]
pub fn overview_map(locations: &[Location], summaries: &HashMap<i64, DaySummary>) -> String {
    let id = fragment_id("map");
    let (center_lat, center_lon) = NATIONAL_CENTER;

    let mut html = format!(
        "<div id=\"{id}\" style=\"height:500px;\"></div>\n\
         <script>\n\
           (function() {{\n\
             var map = L.map('{id}').setView([{center_lat}, {center_lon}], {NATIONAL_ZOOM});\n\
             L.tileLayer('{TILE_URL}', {{\n\
               attribution: '{TILE_ATTRIBUTION}'\n\
             }}).addTo(map);\n"
    );

    for location in locations {
        let mut popup = location.name.clone();
        if let Some(summary) = summaries.get(&location.global_id) {
            popup.push_str(&format!(
                " — {} {} {}°C–{}°C",
                summary.emoji,
                summary.weather_description,
                summary.temp_min,
                summary.temp_max
            ));
        }
        html.push_str(&format!(
            "    L.marker([{}, {}]).addTo(map).bindPopup({});\n",
            location.latitude,
            location.longitude,
            js_string(&popup)
        ));
    }

    html.push_str("  })();\n</script>\n");
    html
}
