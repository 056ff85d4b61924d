//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::{NOMINATIM_URL, USER_AGENT};

/// Show the "current location" button
pub const DEFAULT_SHOW_CURRENT_LOCATION_BUTTON: bool = true;

/// Center on the device location when no place is given at startup
pub const DEFAULT_SHOW_CURRENT_LOCATION_INITIALLY: bool = true;

/// Select the device location when no place is given at startup
pub const DEFAULT_SELECT_CURRENT_LOCATION_INITIALLY: bool = false;

/// Bias searches towards the device location
pub const DEFAULT_USE_CURRENT_LOCATION_AS_HINT: bool = false;

/// Side of the region shown around a selected place, in meters
pub const DEFAULT_RESULT_REGION_RADIUS_METERS: f64 = 600.0;

/// Delay between the last keystroke and the search request
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 200;

/// Maximum number of search results requested
pub const DEFAULT_SEARCH_RESULT_LIMIT: usize = 10;

/// Search box placeholder
pub const DEFAULT_SEARCH_BAR_PLACEHOLDER: &str = "Search or enter an address";

/// Header shown above history rows
pub const DEFAULT_SEARCH_HISTORY_LABEL: &str = "Search History";

/// Title of the marker's confirm control
pub const DEFAULT_SELECT_BUTTON_TITLE: &str = "Select";

/// Default geocoder base URL
pub const DEFAULT_GEOCODER_URL: &str = NOMINATIM_URL;

/// Default geocoder user agent
pub const DEFAULT_GEOCODER_USER_AGENT: &str = USER_AGENT;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "pinpoint";
