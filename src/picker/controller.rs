//! Selection controller
//!
//! The single authority for what is selected. Every input, whether from the
//! user or a finished lookup, goes through [`SelectionController::apply`],
//! which updates state and returns the effects to perform. Nothing here
//! touches the network or the view.

use crate::config::PickerConfig;
use crate::coord::{Coordinates, Region};
use crate::error::{LookupError, LookupResult};
use crate::geo::FixUpdate;
use crate::history::HistoryStore;
use crate::picker::event::{Effect, Event, Ticket};
use crate::picker::fix::{FixAction, LocationFixListener};
use crate::picker::state::{Marker, PendingOrigin, SelectionState};
use crate::place::Place;
use tracing::{debug, info, warn};

/// State machine behind the picker
#[derive(Debug)]
pub struct SelectionController {
    config: PickerConfig,
    history: HistoryStore,
    state: SelectionState,
    fixes: LocationFixListener<FixAction>,
    last_fix: Option<Coordinates>,
    /// The next fix becomes the selection unless the user picks first
    auto_select_armed: bool,
    last_ticket: Option<Ticket>,
    rows: Vec<Place>,
    rows_are_history: bool,
    /// Text the search box is known to display
    shown_text: String,
    finished: bool,
}

impl SelectionController {
    pub fn new(config: PickerConfig, history: HistoryStore) -> Self {
        Self {
            config,
            history,
            state: SelectionState::default(),
            fixes: LocationFixListener::new(),
            last_fix: None,
            auto_select_armed: false,
            last_ticket: None,
            rows: Vec::new(),
            rows_are_history: false,
            shown_text: String::new(),
            finished: false,
        }
    }

    /// Apply one event and return the effects it requires
    ///
    /// Marker and search-box updates are derived from the state change, so
    /// the view never shows more than one marker and never a stale label.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        if self.finished {
            debug!(?event, "Picker already closed, ignoring event");
            return Vec::new();
        }

        let marker_before = self.state.marker();
        let current_before = self.state.current.clone();
        let mut effects = Vec::new();

        match event {
            Event::Start { initial } => self.start(initial, &mut effects),
            Event::MapLongPress(coords) => self.begin_geocode(coords, &mut effects),
            Event::SearchTextChanged(text) => self.search_text_changed(text, &mut effects),
            Event::RowPicked(index) => self.row_picked(index, &mut effects),
            Event::SearchResultPicked(place) => self.select(place, true, &mut effects),
            Event::HistoryRowPicked(place) => self.select(place, false, &mut effects),
            Event::CurrentLocationPressed => self.current_location_pressed(&mut effects),
            Event::AutoSelectCurrentLocation => self.begin_auto_select(&mut effects),
            Event::MarkerConfirmed => self.commit(&mut effects),
            Event::GeocodeFinished { ticket, result } => {
                self.geocode_finished(ticket, result, &mut effects)
            }
            Event::SearchDebounceElapsed { ticket } => {
                self.search_debounce_elapsed(ticket, &mut effects)
            }
            Event::SearchFinished { ticket, result } => {
                self.search_finished(ticket, result, &mut effects)
            }
            Event::LocationUpdate(update) => self.location_update(update, &mut effects),
        }

        let marker_after = self.state.marker();
        if marker_after != marker_before {
            effects.insert(0, Effect::SetMarker(marker_after));
        }
        if self.state.current != current_before {
            let text = self.state.display_text();
            self.show_text(text, &mut effects);
        }

        effects
    }

    // ─────────────────────────────────────────────────────────
    // Named operations
    // ─────────────────────────────────────────────────────────

    pub fn set_initial_place(&mut self, place: Option<Place>) -> Vec<Effect> {
        self.apply(Event::Start { initial: place })
    }

    pub fn handle_map_long_press(&mut self, coords: Coordinates) -> Vec<Effect> {
        self.apply(Event::MapLongPress(coords))
    }

    pub fn handle_search_text_changed(&mut self, text: impl Into<String>) -> Vec<Effect> {
        self.apply(Event::SearchTextChanged(text.into()))
    }

    pub fn handle_search_result_picked(&mut self, place: Place) -> Vec<Effect> {
        self.apply(Event::SearchResultPicked(place))
    }

    pub fn handle_history_row_picked(&mut self, place: Place) -> Vec<Effect> {
        self.apply(Event::HistoryRowPicked(place))
    }

    pub fn handle_current_location_button_pressed(&mut self) -> Vec<Effect> {
        self.apply(Event::CurrentLocationPressed)
    }

    pub fn begin_auto_select_current_location(&mut self) -> Vec<Effect> {
        self.apply(Event::AutoSelectCurrentLocation)
    }

    pub fn commit_and_close(&mut self) -> Vec<Effect> {
        self.apply(Event::MarkerConfirmed)
    }

    // ─────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────

    pub fn current(&self) -> Option<&Place> {
        self.state.current.as_ref()
    }

    pub fn pending(&self) -> &PendingOrigin {
        &self.state.pending
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn marker(&self) -> Marker {
        self.state.marker()
    }

    /// Rows currently listed, and whether they are history entries
    pub fn rows(&self) -> (&[Place], bool) {
        (&self.rows, self.rows_are_history)
    }

    pub fn last_fix(&self) -> Option<Coordinates> {
        self.last_fix
    }

    pub fn is_location_denied(&self) -> bool {
        self.fixes.is_denied()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    // ─────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────

    fn start(&mut self, initial: Option<Place>, effects: &mut Vec<Effect>) {
        match initial {
            Some(place) => {
                debug!(title = %place.title(), "Starting with initial place");
                self.supersede(PendingOrigin::None, effects);
                self.auto_select_armed = false;
                effects.push(Effect::SetRegion(self.region_around(place.coordinate())));
                self.state.current = Some(place);
            }
            None if self.config.select_current_location_initially => {
                self.begin_auto_select(effects)
            }
            None if self.config.show_current_location_initially => {
                self.request_fix(FixAction::Recenter, effects)
            }
            None => {}
        }

        if self.config.use_current_location_as_hint {
            self.request_fix(FixAction::Remember, effects);
        }
    }

    /// Drop the current selection and reverse geocode `coords`
    fn begin_geocode(&mut self, coords: Coordinates, effects: &mut Vec<Effect>) {
        let ticket = self.issue_ticket();
        debug!(%coords, %ticket, "Reverse geocoding chosen point");
        self.auto_select_armed = false;
        self.state.current = None;
        self.supersede(PendingOrigin::AwaitingGeocode { coords, ticket }, effects);
        effects.push(Effect::ReverseGeocode { ticket, coords });
    }

    fn search_text_changed(&mut self, text: String, effects: &mut Vec<Effect>) {
        let query = text.trim().to_string();

        if query.is_empty() {
            // The view repeating a cleared box must not cancel a pending lookup
            let echoed = text == self.shown_text && self.state.current.is_none();
            self.shown_text = text;
            if echoed {
                debug!("Search box already cleared");
            } else {
                self.supersede(PendingOrigin::None, effects);
                self.state.current = None;
            }
            self.rows = self.history.load();
            self.rows_are_history = true;
            effects.push(Effect::SetRows {
                rows: self.rows.clone(),
                is_history: true,
            });
            return;
        }

        if text == self.shown_text {
            debug!(query, "Search text unchanged");
            return;
        }
        self.shown_text = text;

        let ticket = self.issue_ticket();
        self.supersede(PendingOrigin::AwaitingSearch { query, ticket }, effects);
        self.rows.clear();
        self.rows_are_history = false;
        effects.push(Effect::SetRows {
            rows: Vec::new(),
            is_history: false,
        });
        effects.push(Effect::ScheduleSearch {
            ticket,
            delay: self.config.search_debounce(),
        });
    }

    fn row_picked(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(place) = self.rows.get(index).cloned() else {
            warn!(index, rows = self.rows.len(), "Picked row out of range");
            return;
        };
        let remember = !self.rows_are_history;
        self.select(place, remember, effects);
    }

    /// Adopt a place picked from the results list
    fn select(&mut self, place: Place, remember: bool, effects: &mut Vec<Effect>) {
        self.supersede(PendingOrigin::None, effects);
        self.auto_select_armed = false;
        effects.push(Effect::DismissResults);
        effects.push(Effect::SetRegion(self.region_around(place.coordinate())));
        self.show_text(place.title(), effects);

        if remember {
            if let Err(e) = self.history.append(&place) {
                warn!(error = %e, "Failed to save place to history");
            }
        }

        self.state.current = Some(place);
    }

    fn current_location_pressed(&mut self, effects: &mut Vec<Effect>) {
        if !self.config.show_current_location_button {
            debug!("Current-location button is disabled");
            return;
        }
        if self.fixes.is_denied() {
            debug!("Location permission denied, ignoring current-location button");
            return;
        }

        if self.config.select_current_location_initially {
            self.begin_auto_select(effects);
        } else {
            self.request_fix(FixAction::Recenter, effects);
        }
    }

    fn begin_auto_select(&mut self, effects: &mut Vec<Effect>) {
        if self.fixes.is_denied() {
            debug!("Location permission denied, not auto-selecting");
            return;
        }
        self.supersede(PendingOrigin::AwaitingInitialFix, effects);
        self.auto_select_armed = true;
        self.request_fix(FixAction::AutoSelect, effects);
    }

    fn commit(&mut self, effects: &mut Vec<Effect>) {
        self.supersede(PendingOrigin::None, effects);
        self.auto_select_armed = false;
        if self.fixes.clear() {
            effects.push(Effect::StopLocationUpdates);
        }
        self.finished = true;

        let place = self.state.current.clone();
        info!(selected = ?place.as_ref().map(Place::title), "Location picked");
        effects.push(Effect::Complete(place));
        effects.push(Effect::Close);
    }

    // ─────────────────────────────────────────────────────────
    // Completions
    // ─────────────────────────────────────────────────────────

    fn geocode_finished(
        &mut self,
        ticket: Ticket,
        result: LookupResult<Place>,
        effects: &mut Vec<Effect>,
    ) {
        let coords = match &self.state.pending {
            PendingOrigin::AwaitingGeocode { coords, ticket: t } if *t == ticket => *coords,
            _ => {
                debug!(%ticket, "Dropping superseded geocode result");
                return;
            }
        };
        self.state.pending = PendingOrigin::None;

        match result {
            Ok(place) => {
                debug!(%coords, title = %place.title(), "Chosen point resolved");
                self.state.current = Some(place);
            }
            Err(e) if e.is_user_visible() => {
                warn!(%coords, error = %e, "Reverse geocoding failed");
                effects.push(Effect::ShowAlert(e.to_string()));
            }
            Err(e) => debug!(%coords, error = %e, "Reverse geocoding ended"),
        }
    }

    fn search_debounce_elapsed(&mut self, ticket: Ticket, effects: &mut Vec<Effect>) {
        match &self.state.pending {
            PendingOrigin::AwaitingSearch { query, ticket: t } if *t == ticket => {
                effects.push(Effect::Search {
                    ticket,
                    query: query.clone(),
                    hint: self.search_hint(),
                });
            }
            _ => debug!(%ticket, "Dropping stale search timer"),
        }
    }

    fn search_finished(
        &mut self,
        ticket: Ticket,
        result: LookupResult<Vec<Place>>,
        effects: &mut Vec<Effect>,
    ) {
        let is_current = matches!(
            &self.state.pending,
            PendingOrigin::AwaitingSearch { ticket: t, .. } if *t == ticket
        );
        if !is_current {
            debug!(%ticket, "Dropping superseded search results");
            return;
        }
        self.state.pending = PendingOrigin::None;

        match result {
            Ok(places) => {
                debug!(%ticket, count = places.len(), "Search finished");
                self.rows = places;
                self.rows_are_history = false;
                effects.push(Effect::SetRows {
                    rows: self.rows.clone(),
                    is_history: false,
                });
            }
            Err(e) if e.is_user_visible() => {
                warn!(error = %e, "Search failed");
                effects.push(Effect::ShowAlert(e.to_string()));
            }
            Err(e) => debug!(%ticket, error = %e, "Search ended"),
        }
    }

    fn location_update(&mut self, update: FixUpdate, effects: &mut Vec<Effect>) {
        match update {
            Ok(coords) => {
                self.last_fix = Some(coords);
                let dispatch = self.fixes.on_fix();
                for action in dispatch.fired {
                    match action {
                        FixAction::Recenter => {
                            effects.push(Effect::SetRegion(self.region_around(coords)))
                        }
                        FixAction::AutoSelect => self.auto_select(coords, effects),
                        FixAction::Remember => debug!(%coords, "Search hint location updated"),
                    }
                }
                if dispatch.stop {
                    effects.push(Effect::StopLocationUpdates);
                }
            }
            Err(LookupError::PermissionDenied) => {
                info!("Location permission denied, disabling current-location features");
                if self.fixes.on_denied() {
                    effects.push(Effect::StopLocationUpdates);
                }
                self.abandon_initial_fix();
            }
            Err(LookupError::Cancelled) => debug!("Location request cancelled"),
            Err(e) => {
                warn!(error = %e, "Location update failed");
                if self.fixes.on_failure() {
                    effects.push(Effect::StopLocationUpdates);
                }
                self.abandon_initial_fix();
                effects.push(Effect::ShowAlert(e.to_string()));
            }
        }
    }

    /// Typing a query does not disarm this; only an actual selection does.
    fn auto_select(&mut self, coords: Coordinates, effects: &mut Vec<Effect>) {
        if !self.auto_select_armed {
            debug!(%coords, "Selection made meanwhile, not auto-selecting");
            return;
        }
        effects.push(Effect::SetRegion(self.region_around(coords)));
        self.begin_geocode(coords, effects);
    }

    // ─────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────

    /// Replace the pending origin, cancelling whatever it was waiting on
    fn supersede(&mut self, next: PendingOrigin, effects: &mut Vec<Effect>) {
        match std::mem::replace(&mut self.state.pending, next) {
            PendingOrigin::AwaitingGeocode { ticket, .. } => {
                debug!(%ticket, "Cancelling reverse geocode");
                effects.push(Effect::CancelGeocode);
            }
            PendingOrigin::AwaitingSearch { ticket, .. } => {
                debug!(%ticket, "Cancelling search");
                effects.push(Effect::CancelSearch);
            }
            PendingOrigin::AwaitingInitialFix | PendingOrigin::None => {}
        }
    }

    fn request_fix(&mut self, action: FixAction, effects: &mut Vec<Effect>) {
        if self.fixes.request_once(action) {
            effects.push(Effect::StartLocationUpdates);
        }
    }

    fn abandon_initial_fix(&mut self) {
        self.auto_select_armed = false;
        if self.state.pending == PendingOrigin::AwaitingInitialFix {
            self.state.pending = PendingOrigin::None;
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.last_ticket.map_or_else(Ticket::first, Ticket::next);
        self.last_ticket = Some(ticket);
        ticket
    }

    fn show_text(&mut self, text: String, effects: &mut Vec<Effect>) {
        if text != self.shown_text {
            self.shown_text = text.clone();
            effects.push(Effect::SetSearchText(text));
        }
    }

    fn region_around(&self, center: Coordinates) -> Region {
        Region::around(center, self.config.result_region_radius_meters)
    }

    fn search_hint(&self) -> Option<Region> {
        if !self.config.use_current_location_as_hint {
            return None;
        }
        self.last_fix.map(Region::search_hint)
    }
}
