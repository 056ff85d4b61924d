//! JSON output formatter

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::{Place, Placemark};
use serde::Serialize;

/// JSON formatter - outputs place details as pretty-printed JSON
pub struct JsonFormatter;

/// Serialized shape of a place
#[derive(Debug, Serialize)]
struct PlaceOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    title: String,
    address: String,
    coordinates: Coordinates,
    placemark: &'a Placemark,
}

impl<'a> From<&'a Place> for PlaceOutput<'a> {
    fn from(place: &'a Place) -> Self {
        Self {
            name: place.name(),
            title: place.title(),
            address: place.address(),
            coordinates: place.coordinate(),
            placemark: place.placemark(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Place details as JSON"
    }

    fn format(&self, place: &Place, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(&PlaceOutput::from(place))?)
    }

    fn format_all(&self, places: &[Place], _config: &Config) -> Result<String> {
        let output: Vec<PlaceOutput<'_>> = places.iter().map(PlaceOutput::from).collect();
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&fixtures::cafe(), &Config::default())
            .unwrap();

        // Verify it's valid JSON
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["name"], "Coffee Corner");
        assert_eq!(parsed["title"], "Coffee Corner");
        assert_eq!(parsed["coordinates"]["lat"], 43.2381);
        assert_eq!(parsed["placemark"]["coordinate"]["lat"], 43.238);
        assert_eq!(parsed["placemark"]["address"]["City"], "Almaty");
    }

    #[test]
    fn test_json_omits_missing_name() {
        let output = JsonFormatter
            .format(&fixtures::street(), &Config::default())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed.get("name").is_none());
        assert_eq!(parsed["title"], "1 Main St");
    }

    #[test]
    fn test_json_format_list() {
        let places = [fixtures::cafe(), fixtures::street()];
        let output = JsonFormatter.format_all(&places, &Config::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
