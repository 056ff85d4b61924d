//! Geocoding, place search and device location
//!
//! Defines the provider traits the picker talks to and ships concrete
//! backends: Nominatim for reverse geocoding and search, and an IP-based
//! location provider.

pub mod ip_location;
pub mod nominatim;

#[cfg(test)]
pub(crate) mod fake;

use crate::coord::{Coordinates, Region};
use crate::error::{LookupResult, Result};
use crate::place::{Place, Placemark};
use std::future::Future;
use tokio::sync::mpsc;

/// A device location update: a fix, or the reason none is coming
pub type FixUpdate = LookupResult<Coordinates>;

/// Channel the location provider delivers updates on
pub type FixSender = mpsc::UnboundedSender<FixUpdate>;

/// Trait for reverse geocoding backends
pub trait Geocoder: Send + Sync {
    /// Resolve a coordinate into candidate placemarks, best first
    fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> impl Future<Output = Result<Vec<Placemark>>> + Send;
}

/// Trait for free-text place search backends
pub trait PlaceSearch: Send + Sync {
    /// Search for places matching `query`, optionally biased towards `hint`
    fn search(
        &self,
        query: &str,
        hint: Option<Region>,
    ) -> impl Future<Output = Result<Vec<Place>>> + Send;
}

/// Trait for device location sources
///
/// Once started, a provider sends fixes until stopped. A provider without
/// location access sends `LookupError::PermissionDenied` and nothing else.
pub trait LocationProvider: Send + Sync {
    /// Start delivering updates on `updates`; restarting replaces the channel
    fn start_updates(&self, updates: FixSender);

    /// Stop delivering updates
    fn stop_updates(&self);
}

/// Get the default geocoding and search backend
pub fn get_geocoder(config: &crate::config::GeocoderConfig) -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::new(config)
}

/// Get the IP location service
pub fn get_ip_locator() -> Result<ip_location::IpLocator> {
    ip_location::IpLocator::new()
}
