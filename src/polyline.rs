//! Route geometry for display.
//!
//! Geometry comes from the routing engine and is handed to the map view as
//! is. The planner never reads it when ordering stops.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A path through the route as decoded (latitude, longitude) vertices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Builds a polyline from GeoJSON positions, which are `[lng, lat]`.
    pub fn from_lng_lat(positions: &[[f64; 2]]) -> Self {
        Self {
            points: positions.iter().map(|[lng, lat]| (*lat, *lng)).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// GeoJSON `LineString` geometry, ready for a map widget.
    pub fn to_geojson(&self) -> Value {
        let coordinates: Vec<[f64; 2]> = self.points.iter().map(|(lat, lng)| [*lng, *lat]).collect();
        json!({
            "type": "LineString",
            "coordinates": coordinates,
        })
    }
}
