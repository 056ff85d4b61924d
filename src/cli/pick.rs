//! Pick command handler
//!
//! Runs a picker session without a map: the location source given on the
//! command line is fed in as user input, the session is committed, and the
//! chosen place is printed.

use crate::cli::{emit, formatter, list_formats};
use crate::config::Config;
use crate::constants::timing::LOOKUP_TIMEOUT_SECS;
use crate::coord::{Coordinates, Region};
use crate::error::{Error, Result};
use crate::geo::{get_geocoder, get_ip_locator, Geocoder, LocationProvider, PlaceSearch};
use crate::history::HistoryStore;
use crate::picker::{Event, Marker, PendingOrigin, Picker, PickerView, SelectionController};
use crate::place::Place;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::debug;

/// Pick command arguments
#[derive(Args)]
pub struct PickArgs {
    /// Choose the point LAT,LNG (as a long press on the map would)
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["search", "here", "history"])]
    pub at: Option<Coordinates>,

    /// Search for a place and pick one of the results
    #[arg(long, short = 's', conflicts_with_all = ["here", "history"])]
    pub search: Option<String>,

    /// Which search result to pick (1-based)
    #[arg(long, short = 'r', default_value = "1", requires = "search")]
    pub result: usize,

    /// Pick the current location (IP geolocation)
    #[arg(long, conflicts_with = "history")]
    pub here: bool,

    /// Pick an entry from search history (1-based)
    #[arg(long)]
    pub history: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Don't save the pick to history
    #[arg(long)]
    pub no_history: bool,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Input that makes a selection
#[derive(Debug, Clone, PartialEq)]
enum Source {
    Point(Coordinates),
    Search { query: String, index: usize },
    Here,
    History(usize),
}

impl PickArgs {
    fn source(&self) -> Result<Source> {
        if let Some(coords) = self.at {
            return Ok(Source::Point(coords));
        }
        if let Some(query) = &self.search {
            return Ok(Source::Search {
                query: query.clone(),
                index: one_based(self.result, "--result")?,
            });
        }
        if self.here {
            return Ok(Source::Here);
        }
        if let Some(entry) = self.history {
            return Ok(Source::History(one_based(entry, "--history")?));
        }
        Err(Error::Config(
            "No location source specified. Use --at, --search, --here or --history".to_string(),
        ))
    }
}

fn one_based(n: usize, flag: &str) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| Error::Config(format!("{} counts from 1", flag)))
}

/// Picker view that reports to the terminal
#[derive(Debug, Default)]
pub struct TerminalView {
    rows: usize,
}

impl PickerView for TerminalView {
    fn set_region(&mut self, region: Region) {
        debug!(center = %region.center, span = region.span_meters, "Map region");
    }

    fn set_marker(&mut self, marker: &Marker) {
        match marker {
            Marker::Empty => {}
            Marker::Provisional(coords) => eprintln!("Looking up {}...", coords),
            Marker::Resolved(place) => eprintln!("Selected: {}", place.title()),
        }
    }

    fn set_search_text(&mut self, text: &str) {
        debug!(text, "Search box");
    }

    fn set_rows(&mut self, rows: &[Place], header: Option<&str>) {
        self.rows = rows.len();
        if rows.is_empty() {
            return;
        }
        if let Some(header) = header {
            eprintln!("{}:", header);
        }
        for (index, place) in rows.iter().enumerate() {
            eprintln!("{:>3}. {}", index + 1, place.title());
        }
    }

    fn show_alert(&mut self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

/// Step the picker until nothing is pending
async fn settle<G, P, L>(picker: &mut Picker<G, P, L>, timeout: Duration) -> Result<()>
where
    G: Geocoder + 'static,
    P: PlaceSearch + 'static,
    L: LocationProvider,
{
    let wait = async {
        while *picker.controller().pending() != PendingOrigin::None {
            if !picker.step().await {
                break;
            }
        }
    };
    tokio::time::timeout(timeout, wait)
        .await
        .map_err(|_| Error::Geo("Timed out waiting for a lookup".to_string()))
}

/// Feed `source` into the picker, then commit
async fn drive<G, P, L>(picker: &mut Picker<G, P, L>, source: Source, timeout: Duration) -> Result<()>
where
    G: Geocoder + 'static,
    P: PlaceSearch + 'static,
    L: LocationProvider,
{
    match &source {
        Source::Point(coords) => picker.dispatch(Event::MapLongPress(*coords)),
        Source::Search { query, .. } => picker.dispatch(Event::SearchTextChanged(query.clone())),
        Source::Here => picker.dispatch(Event::AutoSelectCurrentLocation),
        Source::History(_) => picker.dispatch(Event::SearchTextChanged(String::new())),
    }
    settle(picker, timeout).await?;

    if let Source::Search { index, .. } | Source::History(index) = source {
        let available = picker.controller().rows().0.len();
        if index >= available {
            return Err(Error::Config(format!(
                "Cannot pick entry {}: only {} available",
                index + 1,
                available
            )));
        }
        picker.dispatch(Event::RowPicked(index));
    }

    picker.dispatch(Event::MarkerConfirmed);
    Ok(())
}

/// Run the pick command
pub async fn run(args: PickArgs, config: Config) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let source = args.source()?;
    let formatter = formatter(args.format.as_deref())?;

    let history = if args.no_history {
        HistoryStore::in_memory()
    } else {
        HistoryStore::open_default()?
    };
    let backend = Arc::new(get_geocoder(&config.geocoder)?.with_limit(config.picker.search_result_limit));
    let locator = Arc::new(get_ip_locator()?);

    // Without a map there is nothing to recenter at startup
    let picker_config = crate::config::PickerConfig {
        show_current_location_initially: false,
        select_current_location_initially: false,
        ..config.picker.clone()
    };
    let controller = SelectionController::new(picker_config, history);

    let (tx, rx) = oneshot::channel();
    let mut picker = Picker::new(
        controller,
        Arc::clone(&backend),
        backend,
        locator,
        TerminalView::default(),
    )
    .with_labels(config.labels.clone())
    .on_completed(move |place| {
        let _ = tx.send(place);
    });

    picker.start(None);
    drive(&mut picker, source, Duration::from_secs(LOOKUP_TIMEOUT_SECS)).await?;

    let place = rx
        .await
        .map_err(|_| Error::Geo("Picker closed without a result".to_string()))?
        .ok_or_else(|| Error::Geo("No location selected".to_string()))?;

    let output = formatter.format(&place, &config)?;
    emit(&output, args.output.as_deref())
}
