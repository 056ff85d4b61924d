//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for reverse geocoding and place search.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::config::GeocoderConfig;
use crate::constants::api::NOMINATIM_URL;
use crate::coord::{Coordinates, Region};
use crate::error::{Error, Result};
use crate::geo::{Geocoder, PlaceSearch};
use crate::place::{address, AddressComponents, Place, Placemark};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Search result limit used when none is configured
const DEFAULT_LIMIT: usize = 10;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

/// Nominatim jsonv2 result item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: HashMap<String, String>,
}

/// Reverse geocoding reply; misses come back as `{"error": ...}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseReply {
    Found(NominatimResult),
    Miss { error: String },
}

impl NominatimBackend {
    /// Create a new Nominatim backend
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: DEFAULT_LIMIT,
        })
    }

    /// Backend against the public Nominatim instance
    pub fn public() -> Result<Self> {
        let config = GeocoderConfig {
            base_url: NOMINATIM_URL.to_string(),
            ..GeocoderConfig::default()
        };
        Self::new(&config)
    }

    /// Set the maximum number of search results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Parse lat/lng strings to coordinates
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid longitude: {}", lng)))?;
        Ok(Coordinates::new(lat, lng))
    }

    /// Map Nominatim's address object onto address components
    ///
    /// Raw keys are kept as-is next to the well-known keys used for
    /// formatting.
    fn address_components(result: &NominatimResult) -> AddressComponents {
        let mut components: AddressComponents = result
            .address
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let street = [result.address.get("house_number"), result.address.get("road")]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        components.insert(address::STREET, street);

        let city = ["city", "town", "village", "hamlet"]
            .into_iter()
            .find_map(|key| result.address.get(key));
        if let Some(city) = city {
            components.insert(address::CITY, city.as_str());
        }
        if let Some(state) = result.address.get("state") {
            components.insert(address::STATE, state.as_str());
        }
        if let Some(postcode) = result.address.get("postcode") {
            components.insert(address::POSTAL_CODE, postcode.as_str());
        }
        if let Some(country) = result.address.get("country") {
            components.insert(address::COUNTRY, country.as_str());
        }
        if let Some(display_name) = &result.display_name {
            components.insert(address::FORMATTED, display_name.as_str());
        }

        components
    }

    /// Named feature of the result, unless it only names the street
    fn point_of_interest(result: &NominatimResult) -> Option<String> {
        let name = result.name.as_deref()?.trim();
        let road = result.address.get("road").map(String::as_str);
        if name.is_empty() || Some(name) == road {
            return None;
        }
        Some(name.to_string())
    }

    fn placemark(result: &NominatimResult) -> Result<Placemark> {
        let coords = Self::parse_coords(&result.lat, &result.lon)?;
        let areas = Self::point_of_interest(result).into_iter().collect();
        Ok(Placemark::new(coords, Self::address_components(result)).with_areas_of_interest(areas))
    }

    fn place(result: &NominatimResult) -> Result<Place> {
        let placemark = Self::placemark(result)?;
        Ok(Place::new(Self::point_of_interest(result), placemark))
    }

    fn search_url(&self, query: &str, hint: Option<Region>) -> String {
        let mut url = format!(
            "{}/search?q={}&format=jsonv2&addressdetails=1&limit={}",
            self.base_url,
            urlencoding::encode(query),
            self.limit
        );

        if let Some(region) = hint {
            let bbox = region.bounding_box();
            // Biased, not bounded: results outside the box are still allowed
            url.push_str(&format!(
                "&viewbox={},{},{},{}&bounded=0",
                bbox.min_lng, bbox.max_lat, bbox.max_lng, bbox.min_lat
            ));
        }

        url
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

impl Geocoder for NominatimBackend {
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Vec<Placemark>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2&addressdetails=1",
            self.base_url, coords.lat, coords.lng
        );
        debug!(%coords, "Reverse geocoding");

        let reply: ReverseReply = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        match reply {
            ReverseReply::Found(result) => Ok(vec![Self::placemark(&result)?]),
            ReverseReply::Miss { error } => {
                debug!(%coords, error, "Nothing found at coordinate");
                Ok(Vec::new())
            }
        }
    }
}

impl PlaceSearch for NominatimBackend {
    async fn search(&self, query: &str, hint: Option<Region>) -> Result<Vec<Place>> {
        let url = self.search_url(query, hint);
        debug!(query, hinted = hint.is_some(), "Searching places");

        let results: Vec<NominatimResult> = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        results.iter().map(Self::place).collect()
    }
}
