//! Selection state
//!
//! The single source of truth for what is selected and what the picker is
//! waiting on. The map marker is derived from it, never stored separately,
//! so there can only ever be one.

use crate::coord::Coordinates;
use crate::picker::event::Ticket;
use crate::place::Place;

/// What the next selection is expected to come from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PendingOrigin {
    /// Nothing outstanding
    #[default]
    None,
    /// Reverse geocoding a point the user chose
    AwaitingGeocode { coords: Coordinates, ticket: Ticket },
    /// Waiting for the first device fix to select it
    AwaitingInitialFix,
    /// Waiting for search results for `query`
    AwaitingSearch { query: String, ticket: Ticket },
}

/// The single marker shown on the map
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Marker {
    /// No marker
    #[default]
    Empty,
    /// Unlabeled pin while the point is being geocoded
    Provisional(Coordinates),
    /// Labeled pin for the current selection
    Resolved(Place),
}

impl Marker {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Where the marker sits, if there is one
    pub fn coordinate(&self) -> Option<Coordinates> {
        match self {
            Self::Empty => None,
            Self::Provisional(coords) => Some(*coords),
            Self::Resolved(place) => Some(place.coordinate()),
        }
    }
}

/// Current selection plus the operation that may replace it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub current: Option<Place>,
    pub pending: PendingOrigin,
}

impl SelectionState {
    /// The marker implied by this state
    ///
    /// A resolved selection wins; otherwise a pending geocode shows a
    /// provisional pin.
    pub fn marker(&self) -> Marker {
        match (&self.current, &self.pending) {
            (Some(place), _) => Marker::Resolved(place.clone()),
            (None, PendingOrigin::AwaitingGeocode { coords, .. }) => Marker::Provisional(*coords),
            (None, _) => Marker::Empty,
        }
    }

    /// Text the search box shows for the current selection
    pub fn display_text(&self) -> String {
        self.current.as_ref().map(Place::title).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::fake::street_placemark;

    #[test]
    fn test_empty_state_has_no_marker() {
        let state = SelectionState::default();
        assert_eq!(state.marker(), Marker::Empty);
        assert_eq!(state.display_text(), "");
    }

    #[test]
    fn test_pending_geocode_shows_provisional_marker() {
        let coords = Coordinates::new(1.0, 2.0);
        let state = SelectionState {
            current: None,
            pending: PendingOrigin::AwaitingGeocode {
                coords,
                ticket: Ticket::first(),
            },
        };
        assert_eq!(state.marker(), Marker::Provisional(coords));
        assert_eq!(state.marker().coordinate(), Some(coords));
    }

    #[test]
    fn test_selection_wins_over_pending() {
        let place = Place::new(None, street_placemark(Coordinates::new(5.0, 6.0), "1 Main St"));
        let state = SelectionState {
            current: Some(place.clone()),
            pending: PendingOrigin::AwaitingInitialFix,
        };
        assert_eq!(state.marker(), Marker::Resolved(place));
        assert_eq!(state.display_text(), "1 Main St");
    }
}
