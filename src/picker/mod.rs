//! Location picker core
//!
//! [`SelectionController`] decides what is selected; it is a pure state
//! machine fed with [`Event`]s and answering with [`Effect`]s. The
//! [`Picker`] runtime owns a controller, carries out its effects against a
//! [`PickerView`] and the providers, and feeds completions back in.

pub mod controller;
pub mod event;
pub mod fix;
pub mod runtime;
pub mod session;
pub mod state;

pub use controller::SelectionController;
pub use event::{Effect, Event, EventSender, Ticket};
pub use fix::{FixAction, FixDispatch, ListenerMode, LocationFixListener};
pub use runtime::{Completion, Picker, PickerHandle, PickerView};
pub use session::{Debouncer, GeocodeSession, SearchSession};
pub use state::{Marker, PendingOrigin, SelectionState};
