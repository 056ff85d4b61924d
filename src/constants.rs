//! Centralized constants for the pinpoint crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Meters per degree of latitude (approximate, varies slightly with latitude)
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

    /// Side of the square search hint region, in degrees of latitude
    pub const SEARCH_HINT_SPAN_DEGREES: f64 = 2.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// User agent sent to geocoding services
    pub const USER_AGENT: &str = concat!("pinpoint/", env!("CARGO_PKG_VERSION"));
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}

/// History persistence
pub mod history {
    /// File name of the history blob in the data directory
    pub const HISTORY_FILE_NAME: &str = "history.json";
}

/// Timing for headless picker sessions
pub mod timing {
    /// How long a scripted pick waits for outstanding lookups, in seconds
    pub const LOOKUP_TIMEOUT_SECS: u64 = 30;
}
