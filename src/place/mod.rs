//! Places and placemarks
//!
//! A [`Placemark`] is what a geocoding or search provider returns: a
//! coordinate plus provider address components. A [`Place`] is the
//! immutable value the picker selects: an optional display name, the point
//! the user actually chose, and the placemark describing it.

pub mod address;

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use address::AddressComponents;

/// A provider-resolved location description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placemark {
    /// Coordinate the provider attached to the placemark
    pub coordinate: Coordinates,

    /// Raw provider address components
    #[serde(default)]
    pub address: AddressComponents,

    /// Point-of-interest names the provider associates with this placemark
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub areas_of_interest: Vec<String>,
}

impl Placemark {
    /// Create a placemark with no points of interest
    pub fn new(coordinate: Coordinates, address: AddressComponents) -> Self {
        Self {
            coordinate,
            address,
            areas_of_interest: Vec::new(),
        }
    }

    /// Attach point-of-interest names
    pub fn with_areas_of_interest(mut self, areas: Vec<String>) -> Self {
        self.areas_of_interest = areas;
        self
    }

    /// First point-of-interest name, if the provider offered one
    pub fn area_of_interest(&self) -> Option<&str> {
        self.areas_of_interest
            .iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// A selected location
///
/// Immutable once built; a new selection replaces the current place rather
/// than mutating it.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    name: Option<String>,
    location: Option<Coordinates>,
    placemark: Placemark,
}

impl Place {
    /// Build a place from a provider placemark
    ///
    /// Empty names are treated as absent.
    pub fn new(name: Option<String>, placemark: Placemark) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            location: None,
            placemark,
        }
    }

    /// Build a place for a point the user chose, described by `placemark`
    ///
    /// The chosen point is kept separately from the placemark's own
    /// coordinate and wins when the two differ.
    pub fn at(name: Option<String>, location: Coordinates, placemark: Placemark) -> Self {
        let mut place = Self::new(name, placemark);
        place.location = Some(location);
        place
    }

    /// Place resolved by reverse geocoding `location`
    ///
    /// Named after the placemark's first point of interest, if any.
    pub fn from_reverse_geocode(location: Coordinates, placemark: Placemark) -> Self {
        let name = placemark.area_of_interest().map(str::to_string);
        Self::at(name, location, placemark)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn placemark(&self) -> &Placemark {
        &self.placemark
    }

    /// The user-chosen point, if it was recorded separately
    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Where the place's marker goes
    pub fn coordinate(&self) -> Coordinates {
        self.location.unwrap_or(self.placemark.coordinate)
    }

    /// Formatted address; never empty
    ///
    /// Falls back to the coordinate when the provider gave no usable
    /// address components.
    pub fn address(&self) -> String {
        self.placemark
            .address
            .formatted()
            .unwrap_or_else(|| self.placemark.coordinate.to_string())
    }

    /// Display title: the name when present, else the formatted address
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.address(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_street() -> Placemark {
        let mut components = AddressComponents::new();
        components.insert(address::STREET, "1 Main St");
        Placemark::new(Coordinates::new(1.0, 2.0), components)
    }

    #[test]
    fn test_title_prefers_name() {
        let place = Place::new(Some("Test".into()), main_street());
        assert_eq!(place.title(), "Test");
        assert_eq!(place.address(), "1 Main St");
    }

    #[test]
    fn test_title_falls_back_to_address() {
        let place = Place::new(None, main_street());
        assert_eq!(place.title(), "1 Main St");
    }

    #[test]
    fn test_blank_name_is_absent() {
        let place = Place::new(Some("  ".into()), main_street());
        assert_eq!(place.name(), None);
    }

    #[test]
    fn test_address_never_empty() {
        let placemark = Placemark::new(Coordinates::new(1.0, 2.0), AddressComponents::new());
        let place = Place::new(None, placemark);
        assert_eq!(place.address(), "1.000000, 2.000000");
        assert!(!place.title().is_empty());
    }

    #[test]
    fn test_chosen_point_wins_over_placemark() {
        let chosen = Coordinates::new(1.0005, 2.0005);
        let place = Place::at(None, chosen, main_street());
        assert_eq!(place.coordinate(), chosen);

        let place = Place::new(None, main_street());
        assert_eq!(place.coordinate(), Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn test_reverse_geocode_uses_first_area_of_interest() {
        let placemark = main_street()
            .with_areas_of_interest(vec!["".into(), "Central Park".into(), "Zoo".into()]);
        let place = Place::from_reverse_geocode(Coordinates::new(1.0, 2.0), placemark);
        assert_eq!(place.name(), Some("Central Park"));

        let place = Place::from_reverse_geocode(Coordinates::new(1.0, 2.0), main_street());
        assert_eq!(place.name(), None);
        assert_eq!(place.title(), "1 Main St");
    }
}
