//! Provider address components
//!
//! Stored as an opaque string map so that whatever the provider returned
//! survives a history round-trip. Formatting only looks at a few
//! well-known keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STREET: &str = "Street";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const POSTAL_CODE: &str = "ZIP";
pub const COUNTRY: &str = "Country";
/// Provider's own one-line rendering of the address
pub const FORMATTED: &str = "FormattedAddress";

/// Address components keyed by component name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressComponents(BTreeMap<String, String>);

impl AddressComponents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a component; blank values are ignored
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.0.insert(key.into(), value.trim().to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Human-readable address, if any component is usable
    ///
    /// Renders "street, city state zip, country" from the well-known keys,
    /// falling back to the provider's formatted line.
    pub fn formatted(&self) -> Option<String> {
        let locality = [CITY, STATE, POSTAL_CODE]
            .into_iter()
            .filter_map(|key| self.get(key))
            .collect::<Vec<_>>()
            .join(" ");

        let lines = [self.get(STREET), Some(locality.as_str()), self.get(COUNTRY)]
            .into_iter()
            .flatten()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();

        if !lines.is_empty() {
            return Some(lines.join(", "));
        }

        self.get(FORMATTED).map(str::to_string)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AddressComponents {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut components = Self::new();
        for (key, value) in iter {
            components.insert(key, value);
        }
        components
    }
}
