//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/pinpoint/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Picker behaviour
    #[serde(default)]
    pub picker: PickerConfig,

    /// User-facing labels
    #[serde(default)]
    pub labels: LabelsConfig,

    /// Geocoding service settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Picker behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Whether the current-location button is available
    #[serde(default = "default_show_current_location_button")]
    pub show_current_location_button: bool,

    /// Center on the device location when started without a place
    #[serde(default = "default_show_current_location_initially")]
    pub show_current_location_initially: bool,

    /// Select the device location when started without a place
    #[serde(default = "default_select_current_location_initially")]
    pub select_current_location_initially: bool,

    /// Bias searches towards the last known device location
    #[serde(default = "default_use_current_location_as_hint")]
    pub use_current_location_as_hint: bool,

    /// Side of the region shown around a selected place, in meters
    #[serde(default = "default_result_region_radius_meters")]
    pub result_region_radius_meters: f64,

    /// Delay before a typed query is searched, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Maximum number of search results requested
    #[serde(default = "default_search_result_limit")]
    pub search_result_limit: usize,
}

/// User-facing labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelsConfig {
    #[serde(default = "default_search_bar_placeholder")]
    pub search_bar_placeholder: String,

    #[serde(default = "default_search_history_label")]
    pub search_history_label: String,

    #[serde(default = "default_select_button_title")]
    pub select_button_title: String,
}

/// Geocoding service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Nominatim-compatible base URL
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_show_current_location_button() -> bool {
    DEFAULT_SHOW_CURRENT_LOCATION_BUTTON
}
fn default_show_current_location_initially() -> bool {
    DEFAULT_SHOW_CURRENT_LOCATION_INITIALLY
}
fn default_select_current_location_initially() -> bool {
    DEFAULT_SELECT_CURRENT_LOCATION_INITIALLY
}
fn default_use_current_location_as_hint() -> bool {
    DEFAULT_USE_CURRENT_LOCATION_AS_HINT
}
fn default_result_region_radius_meters() -> f64 {
    DEFAULT_RESULT_REGION_RADIUS_METERS
}
fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}
fn default_search_result_limit() -> usize {
    DEFAULT_SEARCH_RESULT_LIMIT
}
fn default_search_bar_placeholder() -> String {
    DEFAULT_SEARCH_BAR_PLACEHOLDER.to_string()
}
fn default_search_history_label() -> String {
    DEFAULT_SEARCH_HISTORY_LABEL.to_string()
}
fn default_select_button_title() -> String {
    DEFAULT_SELECT_BUTTON_TITLE.to_string()
}
fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}
fn default_geocoder_user_agent() -> String {
    DEFAULT_GEOCODER_USER_AGENT.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},17z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=17/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            show_current_location_button: default_show_current_location_button(),
            show_current_location_initially: default_show_current_location_initially(),
            select_current_location_initially: default_select_current_location_initially(),
            use_current_location_as_hint: default_use_current_location_as_hint(),
            result_region_radius_meters: default_result_region_radius_meters(),
            search_debounce_ms: default_search_debounce_ms(),
            search_result_limit: default_search_result_limit(),
        }
    }
}

impl PickerConfig {
    /// Debounce delay as a duration
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            search_bar_placeholder: default_search_bar_placeholder(),
            search_history_label: default_search_history_label(),
            select_button_title: default_select_button_title(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_geocoder_user_agent(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["picker", "show_current_location_button"] => {
                Some(self.picker.show_current_location_button.to_string())
            }
            ["picker", "show_current_location_initially"] => {
                Some(self.picker.show_current_location_initially.to_string())
            }
            ["picker", "select_current_location_initially"] => {
                Some(self.picker.select_current_location_initially.to_string())
            }
            ["picker", "use_current_location_as_hint"] => {
                Some(self.picker.use_current_location_as_hint.to_string())
            }
            ["picker", "result_region_radius_meters"] => {
                Some(self.picker.result_region_radius_meters.to_string())
            }
            ["picker", "search_debounce_ms"] => Some(self.picker.search_debounce_ms.to_string()),
            ["picker", "search_result_limit"] => Some(self.picker.search_result_limit.to_string()),

            ["labels", "search_bar_placeholder"] => Some(self.labels.search_bar_placeholder.clone()),
            ["labels", "search_history_label"] => Some(self.labels.search_history_label.clone()),
            ["labels", "select_button_title"] => Some(self.labels.select_button_title.clone()),

            ["geocoder", "base_url"] => Some(self.geocoder.base_url.clone()),
            ["geocoder", "user_agent"] => Some(self.geocoder.user_agent.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["picker", "show_current_location_button"] => {
                self.picker.show_current_location_button = parse_bool(value)?;
            }
            ["picker", "show_current_location_initially"] => {
                self.picker.show_current_location_initially = parse_bool(value)?;
            }
            ["picker", "select_current_location_initially"] => {
                self.picker.select_current_location_initially = parse_bool(value)?;
            }
            ["picker", "use_current_location_as_hint"] => {
                self.picker.use_current_location_as_hint = parse_bool(value)?;
            }
            ["picker", "result_region_radius_meters"] => {
                let radius: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(Error::Config(format!("Radius must be positive: {}", value)));
                }
                self.picker.result_region_radius_meters = radius;
            }
            ["picker", "search_debounce_ms"] => {
                self.picker.search_debounce_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid debounce value: {}", value))
                })?;
            }
            ["picker", "search_result_limit"] => {
                self.picker.search_result_limit = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid limit value: {}", value))
                })?;
            }

            ["labels", "search_bar_placeholder"] => {
                self.labels.search_bar_placeholder = value.to_string();
            }
            ["labels", "search_history_label"] => {
                self.labels.search_history_label = value.to_string();
            }
            ["labels", "select_button_title"] => {
                self.labels.select_button_title = value.to_string();
            }

            ["geocoder", "base_url"] => {
                self.geocoder.base_url = value.trim_end_matches('/').to_string();
            }
            ["geocoder", "user_agent"] => {
                self.geocoder.user_agent = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "picker.show_current_location_button",
            "picker.show_current_location_initially",
            "picker.select_current_location_initially",
            "picker.use_current_location_as_hint",
            "picker.result_region_radius_meters",
            "picker.search_debounce_ms",
            "picker.search_result_limit",
            "labels.search_bar_placeholder",
            "labels.search_history_label",
            "labels.select_button_title",
            "geocoder.base_url",
            "geocoder.user_agent",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }
}
