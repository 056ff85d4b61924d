//! IP-based geolocation
//!
//! Uses ip-api.com for IP geolocation with file-based caching. Acts as a
//! coarse device location provider: each start delivers a single fix.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::coord::Coordinates;
use crate::error::{Error, LookupError, Result};
use crate::geo::{FixSender, LocationProvider};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    lookup: Lookup,
    running: Mutex<Option<CancellationToken>>,
}

/// The part of the locator a background lookup needs
#[derive(Debug, Clone)]
struct Lookup {
    client: reqwest::Client,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Cached location data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedLocation {
    location: Coordinates,
    timestamp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl IpLocator {
    /// Create a new IP locator with default cache path
    pub fn new() -> Result<Self> {
        let cache_path = dirs::cache_dir().map(|p| p.join("pinpoint").join(IP_LOCATION_CACHE_FILE));
        Ok(Self::build(reqwest::Client::builder().build()?, cache_path))
    }

    /// Create an IP locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Result<Self> {
        Ok(Self::build(reqwest::Client::builder().build()?, Some(cache_path)))
    }

    /// Create an IP locator without caching
    pub fn without_cache() -> Result<Self> {
        Ok(Self::build(reqwest::Client::builder().build()?, None))
    }

    fn build(client: reqwest::Client, cache_path: Option<PathBuf>) -> Self {
        Self {
            lookup: Lookup { client, cache_path },
            running: Mutex::new(None),
        }
    }

    /// Get current location based on IP address
    pub async fn locate(&self) -> Result<Coordinates> {
        self.lookup.locate().await
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.lookup.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }

    /// Get cache duration
    pub fn cache_duration() -> Duration {
        Duration::from_secs(IP_LOCATION_TTL_SECS)
    }

    fn replace_running(&self, token: Option<CancellationToken>) {
        let previous = match self.running.lock() {
            Ok(mut running) => std::mem::replace(&mut *running, token),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), token),
        };
        if let Some(previous) = previous {
            previous.cancel();
        }
    }
}

impl Lookup {
    async fn locate(&self) -> Result<Coordinates> {
        // Check cache first
        if let Some(cached) = self.load_cache() {
            return Ok(cached);
        }

        let location = self.fetch_location().await?;
        self.save_cache(location);
        Ok(location)
    }

    /// Fetch location from ip-api.com
    async fn fetch_location(&self) -> Result<Coordinates> {
        let response = self
            .client
            .get(IP_API_URL)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        Self::coordinates(data)
    }

    fn coordinates(data: IpApiResponse) -> Result<Coordinates> {
        if data.status != "success" {
            return Err(Error::Geo("IP location lookup failed".to_string()));
        }

        let lat = data
            .lat
            .ok_or_else(|| Error::Geo("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| Error::Geo("No longitude in response".to_string()))?;

        let coords = Coordinates::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }

    /// Load cached location if valid
    fn load_cache(&self) -> Option<Coordinates> {
        let cache_path = self.cache_path.as_ref()?;

        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedLocation = serde_json::from_str(&content).ok()?;

        // Check if cache is still valid
        if now_secs().saturating_sub(cached.timestamp) < IP_LOCATION_TTL_SECS {
            Some(cached.location)
        } else {
            None
        }
    }

    /// Save location to cache
    fn save_cache(&self, location: Coordinates) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        // Ensure cache directory exists
        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let cached = CachedLocation {
            location,
            timestamp: now_secs(),
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }
}

impl LocationProvider for IpLocator {
    fn start_updates(&self, updates: FixSender) {
        let token = CancellationToken::new();
        self.replace_running(Some(token.clone()));

        let lookup = self.lookup.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("IP location lookup stopped");
                }
                result = lookup.locate() => {
                    let update = result.map_err(|e| {
                        warn!(error = %e, "IP location lookup failed");
                        LookupError::from(e)
                    });
                    let _ = updates.send(update);
                }
            }
        });
    }

    fn stop_updates(&self) {
        self.replace_running(None);
    }
}
