//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::Place;

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, place: &Place, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{}\n", place.title()));
        if place.name().is_some() {
            output.push_str(&format!("  Address: {}\n", place.address()));
        }
        output.push_str(&format!("  Coordinates: {}\n", place.coordinate()));

        if let Some(poi) = place.placemark().area_of_interest() {
            if Some(poi) != place.name() {
                output.push_str(&format!("  Near: {}\n", poi));
            }
        }

        Ok(output)
    }

    fn format_all(&self, places: &[Place], _config: &Config) -> Result<String> {
        if places.is_empty() {
            return Ok("No places found.\n".to_string());
        }

        let mut output = String::new();
        for (index, place) in places.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}\n", index + 1, place.title()));
            if place.name().is_some() {
                output.push_str(&format!("     {}\n", place.address()));
            }
            output.push_str(&format!("     ({})\n", place.coordinate()));
        }
        Ok(output)
    }
}
