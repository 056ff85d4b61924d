//! Persisted history record format
//!
//! Each entry is a JSON object:
//!
//! ```json
//! {
//!   "Name": "Central Park",
//!   "LocationCoordinates": {"Latitude": 40.78, "Longitude": -73.96},
//!   "PlacemarkAddressDic": {"Street": "...", "City": "..."},
//!   "PlacemarkCoordinates": {"Latitude": 40.7812, "Longitude": -73.9665}
//! }
//! ```
//!
//! `Name` and `LocationCoordinates` are optional; the latter is only
//! written when the chosen point differs from the placemark coordinate.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::place::{AddressComponents, Place, Placemark};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinateRecord {
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

impl From<Coordinates> for CoordinateRecord {
    fn from(coords: Coordinates) -> Self {
        Self {
            latitude: coords.lat,
            longitude: coords.lng,
        }
    }
}

impl From<CoordinateRecord> for Coordinates {
    fn from(record: CoordinateRecord) -> Self {
        Coordinates::new(record.latitude, record.longitude)
    }
}

/// One persisted history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(
        rename = "LocationCoordinates",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    location: Option<CoordinateRecord>,

    #[serde(rename = "PlacemarkAddressDic")]
    address: AddressComponents,

    #[serde(rename = "PlacemarkCoordinates")]
    placemark_coordinates: CoordinateRecord,

    #[serde(
        rename = "AreasOfInterest",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    areas_of_interest: Vec<String>,
}

impl HistoryRecord {
    /// Serialize a place into a record value
    pub fn to_value(place: &Place) -> Result<Value> {
        let placemark = place.placemark();
        let location = place
            .location()
            .filter(|chosen| *chosen != placemark.coordinate)
            .map(CoordinateRecord::from);

        let record = Self {
            name: place.name().map(str::to_string),
            location,
            address: placemark.address.clone(),
            placemark_coordinates: placemark.coordinate.into(),
            areas_of_interest: placemark.areas_of_interest.clone(),
        };

        serde_json::to_value(record)
            .map_err(|e| Error::History(format!("Failed to serialize history record: {}", e)))
    }

    /// Rebuild a place from a record value
    ///
    /// Fails when the placemark coordinate or address is missing or invalid.
    pub fn from_value(value: Value) -> Result<Place> {
        let record: Self = serde_json::from_value(value)
            .map_err(|e| Error::History(format!("Malformed history record: {}", e)))?;

        let placemark_coordinates = Coordinates::from(record.placemark_coordinates);
        placemark_coordinates.validate()?;

        let placemark = Placemark::new(placemark_coordinates, record.address)
            .with_areas_of_interest(record.areas_of_interest);

        // A bad chosen point is not fatal; the placemark still locates the place
        let location = record
            .location
            .map(Coordinates::from)
            .filter(|coords| coords.validate().is_ok());

        Ok(match location {
            Some(location) => Place::at(record.name, location, placemark),
            None => Place::new(record.name, placemark),
        })
    }

    /// Name stored in a raw record, readable even if the record is not
    pub fn name_of(value: &Value) -> Option<&str> {
        value.get("Name").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::address;
    use serde_json::json;

    fn placemark() -> Placemark {
        let mut components = AddressComponents::new();
        components.insert(address::STREET, "1 Main St");
        Placemark::new(Coordinates::new(1.0, 2.0), components)
    }

    #[test]
    fn test_record_layout() {
        let place = Place::new(Some("Cafe".into()), placemark());
        let value = HistoryRecord::to_value(&place).unwrap();

        assert_eq!(
            value,
            json!({
                "Name": "Cafe",
                "PlacemarkAddressDic": {"Street": "1 Main St"},
                "PlacemarkCoordinates": {"Latitude": 1.0, "Longitude": 2.0}
            })
        );
    }

    #[test]
    fn test_chosen_point_written_only_when_distinct() {
        let same = Place::at(None, Coordinates::new(1.0, 2.0), placemark());
        let value = HistoryRecord::to_value(&same).unwrap();
        assert!(value.get("LocationCoordinates").is_none());

        let distinct = Place::at(None, Coordinates::new(1.5, 2.5), placemark());
        let value = HistoryRecord::to_value(&distinct).unwrap();
        assert_eq!(
            value["LocationCoordinates"],
            json!({"Latitude": 1.5, "Longitude": 2.5})
        );
    }

    #[test]
    fn test_missing_chosen_point_is_tolerated() {
        let place = HistoryRecord::from_value(json!({
            "PlacemarkAddressDic": {"Street": "1 Main St"},
            "PlacemarkCoordinates": {"Latitude": 1.0, "Longitude": 2.0}
        }))
        .unwrap();

        assert_eq!(place.name(), None);
        assert_eq!(place.coordinate(), Coordinates::new(1.0, 2.0));
        assert_eq!(place.address(), "1 Main St");
    }

    #[test]
    fn test_out_of_range_placemark_is_rejected() {
        let result = HistoryRecord::from_value(json!({
            "PlacemarkAddressDic": {},
            "PlacemarkCoordinates": {"Latitude": 123.0, "Longitude": 2.0}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_name_of_raw_record() {
        assert_eq!(HistoryRecord::name_of(&json!({"Name": "Cafe"})), Some("Cafe"));
        assert_eq!(HistoryRecord::name_of(&json!({"Name": 5})), None);
        assert_eq!(HistoryRecord::name_of(&json!("string")), None);
    }
}
