//! Embeddable HTML visualization fragments
//!
//! Pure functions turning normalized forecast data into self-contained
//! chart and map fragments. Every fragment carries a fresh unique DOM id
//! so multiple fragments can be embedded in one response without
//! collisions.

pub mod chart;
pub mod map;

pub use chart::temperature_chart;
pub use map::{location_map, overview_map};

/// Fresh collision-free DOM id for one rendered fragment.
pub(crate) fn fragment_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

/// Embed arbitrary text as a JavaScript string literal.
pub(crate) fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_ids_are_unique() {
        let first = fragment_id("chart");
        let second = fragment_id("chart");
        assert_ne!(first, second);
        assert!(first.starts_with("chart-"));
    }

    #[test]
    fn test_js_string_escapes_quotes() {
        let literal = js_string(r#"Céu "limpo" <script>"#);
        assert!(literal.starts_with('"') && literal.ends_with('"'));
        assert!(literal.contains(r#"\"limpo\""#));
    }
}
