//! Picker runtime
//!
//! Owns the controller and runs it as a single task: events from the view,
//! from lookup sessions and from the location provider are funnelled
//! through one channel, applied one at a time, and the resulting effects are
//! carried out against the view and the providers.

use crate::config::LabelsConfig;
use crate::coord::{Coordinates, Region};
use crate::geo::{FixUpdate, Geocoder, LocationProvider, PlaceSearch};
use crate::picker::controller::SelectionController;
use crate::picker::event::{Effect, Event, EventSender};
use crate::picker::session::{Debouncer, GeocodeSession, SearchSession};
use crate::picker::state::Marker;
use crate::place::Place;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// The surface the picker draws on
pub trait PickerView: Send {
    /// Apply the placeholder and button labels
    fn set_labels(&mut self, _labels: &LabelsConfig) {}

    /// Show `region` on the map
    fn set_region(&mut self, region: Region);

    /// Replace the map marker
    fn set_marker(&mut self, marker: &Marker);

    /// Replace the search box text
    ///
    /// A view may report this text back as a text change; the controller
    /// recognises the echo and ignores it.
    fn set_search_text(&mut self, text: &str);

    /// Replace the results list; history rows come with a header label
    fn set_rows(&mut self, rows: &[Place], header: Option<&str>);

    /// Hide the results list
    fn dismiss_results(&mut self) {}

    /// Show a transient notice
    fn show_alert(&mut self, message: &str);

    /// The picker is done
    fn close(&mut self) {}
}

/// Called with the final selection
pub type Completion = Box<dyn FnOnce(Option<Place>) + Send>;

/// Cloneable handle for feeding user input into a running picker
#[derive(Debug, Clone)]
pub struct PickerHandle {
    events: EventSender,
}

impl PickerHandle {
    /// Send an event; returns false once the picker is gone
    pub fn send(&self, event: Event) -> bool {
        self.events.send(event).is_ok()
    }

    pub fn long_press(&self, coords: Coordinates) -> bool {
        self.send(Event::MapLongPress(coords))
    }

    pub fn text_changed(&self, text: impl Into<String>) -> bool {
        self.send(Event::SearchTextChanged(text.into()))
    }

    pub fn row_picked(&self, index: usize) -> bool {
        self.send(Event::RowPicked(index))
    }

    pub fn current_location_pressed(&self) -> bool {
        self.send(Event::CurrentLocationPressed)
    }

    pub fn confirm(&self) -> bool {
        self.send(Event::MarkerConfirmed)
    }
}

/// A running location picker
pub struct Picker<G, P, L> {
    controller: SelectionController,
    labels: LabelsConfig,
    geocode: GeocodeSession<G>,
    search: SearchSession<P>,
    debounce: Debouncer,
    locator: Arc<L>,
    view: Box<dyn PickerView>,
    completion: Option<Completion>,
    events_tx: EventSender,
    events_rx: mpsc::UnboundedReceiver<Event>,
    fixes_tx: mpsc::UnboundedSender<FixUpdate>,
    fixes_rx: mpsc::UnboundedReceiver<FixUpdate>,
    closed: bool,
}

impl<G, P, L> Picker<G, P, L>
where
    G: Geocoder + 'static,
    P: PlaceSearch + 'static,
    L: LocationProvider,
{
    pub fn new(
        controller: SelectionController,
        geocoder: Arc<G>,
        search: Arc<P>,
        locator: Arc<L>,
        view: impl PickerView + 'static,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (fixes_tx, fixes_rx) = mpsc::unbounded_channel();

        Self {
            controller,
            labels: LabelsConfig::default(),
            geocode: GeocodeSession::new(geocoder),
            search: SearchSession::new(search),
            debounce: Debouncer::new(),
            locator,
            view: Box::new(view),
            completion: None,
            events_tx,
            events_rx,
            fixes_tx,
            fixes_rx,
            closed: false,
        }
    }

    /// Use these labels for the view
    pub fn with_labels(mut self, labels: LabelsConfig) -> Self {
        self.labels = labels;
        self
    }

    /// Call `completion` with the final selection
    pub fn on_completed(mut self, completion: impl FnOnce(Option<Place>) + Send + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    /// Handle for sending input from elsewhere
    pub fn handle(&self) -> PickerHandle {
        PickerHandle {
            events: self.events_tx.clone(),
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Show the picker, optionally starting from `initial`
    pub fn start(&mut self, initial: Option<Place>) {
        self.view.set_labels(&self.labels);
        self.dispatch(Event::Start { initial });
    }

    /// Apply one event and carry out its effects
    pub fn dispatch(&mut self, event: Event) {
        trace!(?event, "Dispatching");
        for effect in self.controller.apply(event) {
            self.execute(effect);
        }
    }

    /// Wait for the next event and dispatch it
    ///
    /// Returns false once the picker is closed.
    pub async fn step(&mut self) -> bool {
        if self.closed {
            return false;
        }

        let event = tokio::select! {
            Some(event) = self.events_rx.recv() => event,
            Some(update) = self.fixes_rx.recv() => Event::LocationUpdate(update),
            else => return false,
        };
        self.dispatch(event);
        !self.closed
    }

    /// Run until the selection is committed
    pub async fn run(mut self) {
        while self.step().await {}
        debug!("Picker finished");
    }

    fn execute(&mut self, effect: Effect) {
        trace!(?effect, "Executing");
        match effect {
            Effect::SetRegion(region) => self.view.set_region(region),
            Effect::SetMarker(marker) => self.view.set_marker(&marker),
            Effect::SetSearchText(text) => self.view.set_search_text(&text),
            Effect::SetRows { rows, is_history } => {
                let header = is_history.then_some(self.labels.search_history_label.as_str());
                self.view.set_rows(&rows, header);
            }
            Effect::DismissResults => self.view.dismiss_results(),
            Effect::ShowAlert(message) => self.view.show_alert(&message),
            Effect::ReverseGeocode { ticket, coords } => {
                self.geocode.resolve(ticket, coords, self.events_tx.clone())
            }
            Effect::CancelGeocode => self.geocode.cancel(),
            Effect::ScheduleSearch { ticket, delay } => {
                self.debounce.schedule(ticket, delay, self.events_tx.clone())
            }
            Effect::Search {
                ticket,
                query,
                hint,
            } => self.search.query(ticket, query, hint, self.events_tx.clone()),
            Effect::CancelSearch => {
                self.debounce.cancel();
                self.search.cancel();
            }
            Effect::StartLocationUpdates => self.locator.start_updates(self.fixes_tx.clone()),
            Effect::StopLocationUpdates => self.locator.stop_updates(),
            Effect::Complete(place) => match self.completion.take() {
                Some(completion) => completion(place),
                None => debug!("No completion handler registered"),
            },
            Effect::Close => {
                self.closed = true;
                self.view.close();
            }
        }
    }
}
