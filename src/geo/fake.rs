//! Scriptable providers for tests

use crate::coord::{Coordinates, Region};
use crate::error::{Error, LookupError, Result};
use crate::geo::{FixSender, Geocoder, LocationProvider, PlaceSearch};
use crate::place::{address, AddressComponents, Place, Placemark};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Placemark at `coords` with a single street line
pub(crate) fn street_placemark(coords: Coordinates, street: &str) -> Placemark {
    let mut components = AddressComponents::new();
    components.insert(address::STREET, street);
    Placemark::new(coords, components)
}

/// Geocoder answering from a script; unscripted coordinates never resolve
#[derive(Default)]
pub(crate) struct FakeGeocoder {
    replies: Mutex<Vec<(Coordinates, std::result::Result<Vec<Placemark>, String>)>>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn answer(self, coords: Coordinates, placemarks: Vec<Placemark>) -> Self {
        self.lock().push((coords, Ok(placemarks)));
        self
    }

    pub(crate) fn fail(self, coords: Coordinates, message: &str) -> Self {
        self.lock().push((coords, Err(message.to_string())));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, Vec<(Coordinates, std::result::Result<Vec<Placemark>, String>)>>
    {
        self.replies.lock().unwrap()
    }
}

impl Geocoder for FakeGeocoder {
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Vec<Placemark>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .lock()
            .iter()
            .find(|(at, _)| *at == coords)
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Ok(placemarks)) => Ok(placemarks),
            Some(Err(message)) => Err(Error::Geocoding(message)),
            None => std::future::pending().await,
        }
    }
}

/// Search provider returning fixed results and recording queries
#[derive(Default)]
pub(crate) struct FakeSearch {
    results: Vec<Place>,
    failure: Option<String>,
    queries: Mutex<Vec<(String, Option<Region>)>>,
}

impl FakeSearch {
    pub(crate) fn returning(results: Vec<Place>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn queries(&self) -> Vec<(String, Option<Region>)> {
        self.queries.lock().unwrap().clone()
    }
}

impl PlaceSearch for FakeSearch {
    async fn search(&self, query: &str, hint: Option<Region>) -> Result<Vec<Place>> {
        self.queries.lock().unwrap().push((query.to_string(), hint));
        match &self.failure {
            Some(message) => Err(Error::Geo(message.clone())),
            None => Ok(self.results.clone()),
        }
    }
}

/// What a fake location provider does when started
#[derive(Debug, Clone, Copy)]
pub(crate) enum FakeFix {
    /// Deliver this fix immediately
    At(Coordinates),
    /// Report missing permission
    Denied,
    /// Never deliver anything
    Silent,
}

/// Location provider with scripted behaviour
pub(crate) struct FakeLocator {
    behaviour: FakeFix,
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl FakeLocator {
    pub(crate) fn new(behaviour: FakeFix) -> Self {
        Self {
            behaviour,
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
        }
    }

    pub(crate) fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub(crate) fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl LocationProvider for FakeLocator {
    fn start_updates(&self, updates: FixSender) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        let _ = match self.behaviour {
            FakeFix::At(coords) => updates.send(Ok(coords)),
            FakeFix::Denied => updates.send(Err(LookupError::PermissionDenied)),
            FakeFix::Silent => Ok(()),
        };
    }

    fn stop_updates(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}
