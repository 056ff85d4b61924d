//! Map regions
//!
//! A region is a square area around a center point, described by its side
//! length in meters. The map surface is told to show a region; the search
//! provider may be biased towards one.

use crate::constants::geo::{EARTH_RADIUS_METERS, METERS_PER_DEGREE_LAT, SEARCH_HINT_SPAN_DEGREES};
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A square map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinates,
    /// Side length of the region in meters
    pub span_meters: f64,
}

/// Axis-aligned lat/lng bounds of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl Region {
    /// Region of `span_meters` on each side, centered on `center`
    pub fn around(center: Coordinates, span_meters: f64) -> Self {
        Self {
            center,
            span_meters,
        }
    }

    /// Region used to bias a place search towards the user's location
    pub fn search_hint(center: Coordinates) -> Self {
        Self::around(center, SEARCH_HINT_SPAN_DEGREES * METERS_PER_DEGREE_LAT)
    }

    /// Lat/lng bounds of this region, clamped to valid ranges
    pub fn bounding_box(&self) -> BoundingBox {
        let half = self.span_meters / 2.0;

        // Longitude degrees per meter varies with latitude
        let meters_per_deg_lng =
            (METERS_PER_DEGREE_LAT * (self.center.lat * PI / 180.0).cos()).max(1.0);

        let delta_lat = half / METERS_PER_DEGREE_LAT;
        let delta_lng = half / meters_per_deg_lng;

        BoundingBox {
            min_lat: (self.center.lat - delta_lat).max(-90.0),
            max_lat: (self.center.lat + delta_lat).min(90.0),
            min_lng: (self.center.lng - delta_lng).max(-180.0),
            max_lng: (self.center.lng + delta_lng).min(180.0),
        }
    }

    /// Check if a point lies inside the region
    pub fn contains(&self, point: Coordinates) -> bool {
        let bbox = self.bounding_box();
        (bbox.min_lat..=bbox.max_lat).contains(&point.lat)
            && (bbox.min_lng..=bbox.max_lng).contains(&point.lng)
    }
}

/// Calculate the distance between two points in meters (Haversine formula)
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
