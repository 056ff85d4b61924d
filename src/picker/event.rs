//! Events and effects (TEA pattern)
//!
//! Everything that can happen to the picker is an [`Event`]; everything the
//! picker wants done in response is an [`Effect`]. The controller turns one
//! into the other synchronously; the runtime performs the effects.

use crate::coord::{Coordinates, Region};
use crate::error::LookupResult;
use crate::geo::FixUpdate;
use crate::picker::state::Marker;
use crate::place::Place;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Identity of one asynchronous request
///
/// A completion is only applied if its ticket is still the one the
/// controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn first() -> Self {
        Self(1)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Channel completions are posted back on
pub type EventSender = mpsc::UnboundedSender<Event>;

/// All possible inputs to the selection controller
#[derive(Debug, Clone)]
pub enum Event {
    // ─────────────────────────────────────────────────────────
    // User / view input
    // ─────────────────────────────────────────────────────────
    /// Picker shown, optionally with a place to start from
    Start { initial: Option<Place> },
    /// Long press on the map
    MapLongPress(Coordinates),
    /// Search box text changed
    SearchTextChanged(String),
    /// A row of the results list was picked
    RowPicked(usize),
    /// A search result was picked
    SearchResultPicked(Place),
    /// A history entry was picked
    HistoryRowPicked(Place),
    /// The current-location button was pressed
    CurrentLocationPressed,
    /// Select the device location once it is known
    AutoSelectCurrentLocation,
    /// The marker's confirm control was tapped
    MarkerConfirmed,

    // ─────────────────────────────────────────────────────────
    // Completions
    // ─────────────────────────────────────────────────────────
    /// Reverse geocoding finished
    GeocodeFinished {
        ticket: Ticket,
        result: LookupResult<Place>,
    },
    /// The debounce delay for a typed query ran out
    SearchDebounceElapsed { ticket: Ticket },
    /// Place search finished
    SearchFinished {
        ticket: Ticket,
        result: LookupResult<Vec<Place>>,
    },
    /// Device location update
    LocationUpdate(FixUpdate),
}

/// Side effects requested by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    // ─────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────
    /// Show a region of the map
    SetRegion(Region),
    /// Replace the map marker
    SetMarker(Marker),
    /// Replace the search box text
    SetSearchText(String),
    /// Replace the results list
    SetRows { rows: Vec<Place>, is_history: bool },
    /// Hide the results list
    DismissResults,
    /// Show a transient, dismissible notice
    ShowAlert(String),

    // ─────────────────────────────────────────────────────────
    // Asynchronous work
    // ─────────────────────────────────────────────────────────
    /// Reverse geocode `coords`, replacing any geocode in flight
    ReverseGeocode { ticket: Ticket, coords: Coordinates },
    /// Cancel the geocode in flight
    CancelGeocode,
    /// Post `SearchDebounceElapsed` after `delay`
    ScheduleSearch { ticket: Ticket, delay: Duration },
    /// Search for `query`, replacing any search in flight
    Search {
        ticket: Ticket,
        query: String,
        hint: Option<Region>,
    },
    /// Cancel the pending debounce and the search in flight
    CancelSearch,
    /// Start device location updates
    StartLocationUpdates,
    /// Stop device location updates
    StopLocationUpdates,

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Hand the final selection to the embedder
    Complete(Option<Place>),
    /// Close the picker
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_are_distinct() {
        let first = Ticket::first();
        let second = first.next();
        assert_ne!(first, second);
        assert_eq!(second.to_string(), "#2");
    }
}
