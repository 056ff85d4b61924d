//! Lookup sessions
//!
//! Each session runs at most one lookup at a time. Starting a new one
//! cancels the previous one, whose completion then arrives as
//! [`LookupError::Cancelled`] so the controller can drop it silently.

use crate::coord::{Coordinates, Region};
use crate::error::{LookupError, LookupResult};
use crate::geo::{Geocoder, PlaceSearch};
use crate::picker::event::{Event, EventSender, Ticket};
use crate::place::Place;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The token of the lookup currently running, if any
#[derive(Debug, Default)]
struct InFlight {
    current: Option<(Ticket, CancellationToken)>,
}

impl InFlight {
    /// Cancel the running lookup and hand out a token for the next one
    fn replace(&mut self, ticket: Ticket) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some((previous, old)) = self.current.replace((ticket, token.clone())) {
            if !old.is_cancelled() {
                debug!(%previous, %ticket, "Superseding lookup");
                old.cancel();
            }
        }
        token
    }

    fn cancel(&mut self) {
        if let Some((ticket, token)) = self.current.take() {
            debug!(%ticket, "Cancelling lookup");
            token.cancel();
        }
    }
}

/// Run `lookup` until it finishes or `token` is cancelled
async fn cancellable<T>(
    token: CancellationToken,
    lookup: impl Future<Output = LookupResult<T>>,
) -> LookupResult<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(LookupError::Cancelled),
        result = lookup => result,
    }
}

/// Reverse geocoding, one request at a time
#[derive(Debug)]
pub struct GeocodeSession<G> {
    geocoder: Arc<G>,
    in_flight: InFlight,
}

impl<G: Geocoder + 'static> GeocodeSession<G> {
    pub fn new(geocoder: Arc<G>) -> Self {
        Self {
            geocoder,
            in_flight: InFlight::default(),
        }
    }

    /// Resolve `coords` into a place
    ///
    /// The first candidate wins. Its point of interest, if any, names the
    /// place; otherwise the place is unnamed and titled by its address.
    pub async fn lookup(geocoder: &G, coords: Coordinates) -> LookupResult<Place> {
        let placemarks = geocoder.reverse_geocode(coords).await?;
        let placemark = placemarks.into_iter().next().ok_or_else(|| {
            LookupError::ProviderFailure(format!("No address found at {}", coords))
        })?;
        Ok(Place::from_reverse_geocode(coords, placemark))
    }

    /// Start resolving `coords`, cancelling the request in flight
    ///
    /// The outcome is posted as [`Event::GeocodeFinished`].
    pub fn resolve(&mut self, ticket: Ticket, coords: Coordinates, events: EventSender) {
        let token = self.in_flight.replace(ticket);
        let geocoder = Arc::clone(&self.geocoder);

        tokio::spawn(async move {
            let result = cancellable(token, Self::lookup(&geocoder, coords)).await;
            let _ = events.send(Event::GeocodeFinished { ticket, result });
        });
    }

    /// Cancel the request in flight
    pub fn cancel(&mut self) {
        self.in_flight.cancel();
    }
}

/// Free-text place search, one query at a time
#[derive(Debug)]
pub struct SearchSession<P> {
    provider: Arc<P>,
    in_flight: InFlight,
}

impl<P: PlaceSearch + 'static> SearchSession<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            in_flight: InFlight::default(),
        }
    }

    /// Search for `text`, biased towards `hint` when given
    pub async fn lookup(provider: &P, text: &str, hint: Option<Region>) -> LookupResult<Vec<Place>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(provider.search(text, hint).await?)
    }

    /// Start a query, cancelling the one in flight
    ///
    /// The outcome is posted as [`Event::SearchFinished`].
    pub fn query(&mut self, ticket: Ticket, text: String, hint: Option<Region>, events: EventSender) {
        let token = self.in_flight.replace(ticket);
        let provider = Arc::clone(&self.provider);

        tokio::spawn(async move {
            let result = cancellable(token, Self::lookup(&provider, &text, hint)).await;
            let _ = events.send(Event::SearchFinished { ticket, result });
        });
    }

    /// Cancel the query in flight
    pub fn cancel(&mut self) {
        self.in_flight.cancel();
    }
}

/// Delay before a typed query is searched
#[derive(Debug, Default)]
pub struct Debouncer {
    timer: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post [`Event::SearchDebounceElapsed`] after `delay`, replacing any
    /// timer not yet fired
    pub fn schedule(&mut self, ticket: Ticket, delay: Duration, events: EventSender) {
        self.cancel();
        let token = CancellationToken::new();
        self.timer = Some(token.clone());

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = events.send(Event::SearchDebounceElapsed { ticket });
                }
            }
        });
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.timer.take() {
            token.cancel();
        }
    }
}
