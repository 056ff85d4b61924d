//! pinpoint: Location picker core
//!
//! A library and CLI tool for choosing a single geographic location from
//! several competing sources: a point chosen on the map, a free-text search,
//! the device location, or a previously picked place.
//!
//! ## Features
//!
//! - Pure selection state machine (events in, effects out)
//! - Supersession of in-flight geocodes and searches via cancellation
//! - Debounced search with optional location bias
//! - Name-deduplicated, persisted search history
//! - Nominatim geocoding/search and IP-based location providers
//!
//! ## Quick Start
//!
//! ```rust
//! use pinpoint::config::PickerConfig;
//! use pinpoint::history::HistoryStore;
//! use pinpoint::picker::{Effect, Marker, SelectionController};
//! use pinpoint::Coordinates;
//!
//! let mut picker = SelectionController::new(PickerConfig::default(), HistoryStore::in_memory());
//!
//! // A long press shows a provisional marker and asks for a reverse geocode
//! let effects = picker.handle_map_long_press(Coordinates::new(43.25, 76.95));
//! assert!(effects.contains(&Effect::SetMarker(Marker::Provisional(Coordinates::new(43.25, 76.95)))));
//! assert!(effects.iter().any(|e| matches!(e, Effect::ReverseGeocode { .. })));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod history;
pub mod picker;
pub mod place;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, Region};
pub use error::{Error, LookupError, Result};
pub use history::HistoryStore;
pub use picker::{Effect, Event, Marker, Picker, PickerView, SelectionController};
pub use place::{Place, Placemark};
