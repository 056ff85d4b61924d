//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::Place;

/// GPX formatter - outputs a GPX waypoint file
pub struct GpxFormatter;

/// Escape text for XML element content
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn waypoint(place: &Place) -> String {
    let coords = place.coordinate();
    let mut wpt = format!(r#"  <wpt lat="{}" lon="{}">"#, coords.lat, coords.lng);
    wpt.push('\n');
    wpt.push_str(&format!("    <name>{}</name>\n", escape(&place.title())));
    if place.name().is_some() {
        wpt.push_str(&format!("    <desc>{}</desc>\n", escape(&place.address())));
    }
    wpt.push_str("    <sym>flag</sym>\n");
    wpt.push_str("  </wpt>\n");
    wpt
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, place: &Place, config: &Config) -> Result<String> {
        self.format_all(std::slice::from_ref(place), config)
    }

    fn format_all(&self, places: &[Place], _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="pinpoint">"#);
        gpx.push('\n');

        for place in places {
            gpx.push_str(&waypoint(place));
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::format::fixtures;
    use crate::place::{AddressComponents, Placemark};

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter
            .format(&fixtures::cafe(), &Config::default())
            .unwrap();

        // Verify GPX structure
        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1" creator="pinpoint">"#));
        assert!(output.contains(r#"<wpt lat="43.2381" lon="76.9452">"#));
        assert!(output.contains("<name>Coffee Corner</name>"));
        assert!(output.contains("<desc>12 Abay Avenue, Almaty 050000, Kazakhstan</desc>"));
        assert!(output.ends_with("</gpx>\n"));
    }

    #[test]
    fn test_gpx_escapes_names() {
        let place = Place::new(
            Some("Fish & Chips <Deluxe>".to_string()),
            Placemark::new(Coordinates::new(1.0, 2.0), AddressComponents::new()),
        );
        let output = GpxFormatter.format(&place, &Config::default()).unwrap();
        assert!(output.contains("<name>Fish &amp; Chips &lt;Deluxe&gt;</name>"));
    }

    #[test]
    fn test_gpx_format_list() {
        let places = [fixtures::cafe(), fixtures::street()];
        let output = GpxFormatter.format_all(&places, &Config::default()).unwrap();
        assert_eq!(output.matches("<wpt").count(), 2);
        assert_eq!(output.matches("<gpx").count(), 1);
    }

    #[test]
    fn test_gpx_formatter_info() {
        let formatter = GpxFormatter;
        assert_eq!(formatter.name(), "gpx");
        assert!(!formatter.description().is_empty());
    }
}
