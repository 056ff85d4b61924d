//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::Place;

/// URL formatter - outputs a map URL for the place
#[derive(Debug, Default)]
pub struct UrlFormatter {
    provider: Option<String>,
}

impl UrlFormatter {
    /// Use `provider` instead of the configured default
    pub fn with_provider(provider: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
        }
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the place"
    }

    fn format(&self, place: &Place, config: &Config) -> Result<String> {
        let coords = place.coordinate();
        config.format_url(self.provider.as_deref(), coords.lat, coords.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn test_url_format_default_provider() {
        let output = UrlFormatter::default()
            .format(&fixtures::cafe(), &Config::default())
            .unwrap();

        // Default provider is OpenStreetMap
        assert!(output.contains("openstreetmap.org"));
        assert!(output.contains("43.2381"));
        assert!(output.contains("76.9452"));
    }

    #[test]
    fn test_url_format_with_provider() {
        let output = UrlFormatter::with_provider("google")
            .format(&fixtures::street(), &Config::default())
            .unwrap();

        assert_eq!(output, "https://www.google.com/maps/@1,2,17z");
    }

    #[test]
    fn test_url_format_unknown_provider() {
        let result = UrlFormatter::with_provider("nowhere").format(&fixtures::cafe(), &Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_url_formatter_info() {
        let formatter = UrlFormatter::default();
        assert_eq!(formatter.name(), "url");
        assert!(!formatter.description().is_empty());
    }
}
