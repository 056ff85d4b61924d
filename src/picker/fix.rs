//! Device-location listener registry
//!
//! Tracks who is waiting for location fixes, whether the underlying
//! provider is running, and whether permission was denied. Pure
//! bookkeeping: the caller turns the returned decisions into effects.

/// How long a listener stays registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerMode {
    /// Removed after the first fix
    Once,
    /// Kept until the registry is cleared
    Persistent,
}

/// What the picker does with a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixAction {
    /// Center the map on the fix
    Recenter,
    /// Select the fix if no selection was made meanwhile
    AutoSelect,
    /// Keep the fix as the search hint
    Remember,
}

/// Outcome of delivering one fix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixDispatch<A> {
    /// Listener actions to run, in registration order
    pub fired: Vec<A>,
    /// Updates should be stopped now
    pub stop: bool,
}

/// Registry of location-fix listeners
///
/// The picker itself only registers one-shot listeners. Persistent ones are
/// for embedders that track the device continuously, such as a live
/// "follow me" map.
#[derive(Debug, Clone)]
pub struct LocationFixListener<A> {
    listeners: Vec<(ListenerMode, A)>,
    updating: bool,
    denied: bool,
}

impl<A> Default for LocationFixListener<A> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            updating: false,
            denied: false,
        }
    }
}

impl<A: Clone> LocationFixListener<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` on the next fix only
    ///
    /// Returns true when updates need to be started.
    pub fn request_once(&mut self, action: A) -> bool {
        self.register(ListenerMode::Once, action)
    }

    /// Run `action` on every fix
    ///
    /// Returns true when updates need to be started.
    pub fn subscribe(&mut self, action: A) -> bool {
        self.register(ListenerMode::Persistent, action)
    }

    fn register(&mut self, mode: ListenerMode, action: A) -> bool {
        if self.denied {
            return false;
        }
        self.listeners.push((mode, action));
        let start = !self.updating;
        self.updating = true;
        start
    }

    /// Deliver a fix to every listener
    ///
    /// One-shot listeners are dropped afterwards. Updates stop when no
    /// persistent listener is left.
    pub fn on_fix(&mut self) -> FixDispatch<A> {
        if !self.updating {
            return FixDispatch {
                fired: Vec::new(),
                stop: false,
            };
        }

        let fired = self.listeners.iter().map(|(_, action)| action.clone()).collect();
        let stop = self.drop_once_listeners();
        FixDispatch { fired, stop }
    }

    /// Location access was refused; nothing will fire from now on
    ///
    /// Returns true when updates were running and should be stopped.
    pub fn on_denied(&mut self) -> bool {
        self.denied = true;
        self.listeners.clear();
        std::mem::replace(&mut self.updating, false)
    }

    /// The provider failed; one-shot listeners are abandoned
    ///
    /// Returns true when updates should be stopped.
    pub fn on_failure(&mut self) -> bool {
        if !self.updating {
            return false;
        }
        self.drop_once_listeners()
    }

    /// Forget every listener
    ///
    /// Returns true when updates were running and should be stopped.
    pub fn clear(&mut self) -> bool {
        self.listeners.clear();
        std::mem::replace(&mut self.updating, false)
    }

    pub fn is_denied(&self) -> bool {
        self.denied
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn drop_once_listeners(&mut self) -> bool {
        self.listeners
            .retain(|(mode, _)| *mode == ListenerMode::Persistent);
        if self.listeners.is_empty() {
            self.updating = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_starts_updates() {
        let mut fixes = LocationFixListener::new();
        assert!(fixes.request_once(FixAction::Recenter));
        assert!(!fixes.request_once(FixAction::AutoSelect));
        assert!(fixes.is_updating());
        assert_eq!(fixes.len(), 2);
    }

    #[test]
    fn test_once_listeners_fire_in_order_then_stop() {
        let mut fixes = LocationFixListener::new();
        fixes.request_once(FixAction::Recenter);
        fixes.request_once(FixAction::AutoSelect);

        let dispatch = fixes.on_fix();
        assert_eq!(dispatch.fired, vec![FixAction::Recenter, FixAction::AutoSelect]);
        assert!(dispatch.stop);
        assert!(fixes.is_empty());
        assert!(!fixes.is_updating());

        // Nothing left to fire
        let dispatch = fixes.on_fix();
        assert!(dispatch.fired.is_empty());
        assert!(!dispatch.stop);
    }

    #[test]
    fn test_persistent_listener_keeps_updates_running() {
        let mut fixes = LocationFixListener::new();
        fixes.subscribe(FixAction::Remember);
        fixes.request_once(FixAction::Recenter);

        let dispatch = fixes.on_fix();
        assert_eq!(dispatch.fired, vec![FixAction::Remember, FixAction::Recenter]);
        assert!(!dispatch.stop);

        let dispatch = fixes.on_fix();
        assert_eq!(dispatch.fired, vec![FixAction::Remember]);
        assert!(fixes.is_updating());
    }

    #[test]
    fn test_denied_makes_registry_inert() {
        let mut fixes = LocationFixListener::new();
        fixes.subscribe(FixAction::Remember);
        assert!(fixes.on_denied());
        assert!(fixes.is_denied());
        assert!(fixes.is_empty());

        assert!(!fixes.request_once(FixAction::Recenter));
        assert!(fixes.is_empty());
        assert!(!fixes.is_updating());
    }

    #[test]
    fn test_failure_drops_only_once_listeners() {
        let mut fixes = LocationFixListener::new();
        fixes.request_once(FixAction::Recenter);
        assert!(fixes.on_failure());
        assert!(fixes.is_empty());

        fixes.subscribe(FixAction::Remember);
        fixes.request_once(FixAction::Recenter);
        assert!(!fixes.on_failure());
        assert_eq!(fixes.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut fixes = LocationFixListener::new();
        assert!(!fixes.clear());
        fixes.request_once(FixAction::Recenter);
        assert!(fixes.clear());
        assert!(fixes.is_empty());
    }
}
