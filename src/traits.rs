//! Core domain traits for the route planner.
//!
//! These are intentionally minimal. The host application implements them for
//! its own delivery, warehouse and routing-engine types.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::polyline::Polyline;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A point that can take part in a route: a delivery or the depot.
pub trait Stop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location coordinates (lat, lng), if geocoded.
    fn location(&self) -> Option<(f64, f64)>;

    /// Human readable label shown next to the stop.
    fn label(&self) -> &str;

    /// A stop may be routed only when both axes are finite and non-zero.
    fn routable_location(&self) -> Option<(f64, f64)> {
        self.location().filter(|&(lat, lng)| is_valid_coordinate(lat, lng))
    }
}

/// Returns `true` when a coordinate pair can be sent to a routing engine.
///
/// Zero on either axis is treated as "not geocoded".
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && lat != 0.0 && lng != 0.0
}

/// Cost annotation requested from a distance provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Meters.
    #[default]
    Distance,
    /// Seconds.
    Duration,
}

/// Travel-mode profile understood by the routing engine (e.g. `car`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelProfile(pub String);

impl TravelProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TravelProfile {
    fn default() -> Self {
        Self::new("car")
    }
}

/// Provides a distance/time matrix for a set of locations.
///
/// The matrix is indexed by the provided location order: `matrix[i][j]` is
/// the cost from `locations[i]` to `locations[j]` in the unit of `metric`.
pub trait DistanceMatrixProvider {
    fn matrix_for(
        &self,
        locations: &[(f64, f64)],
        metric: Metric,
        profile: &TravelProfile,
    ) -> Result<Vec<Vec<f64>>, ProviderError>;
}

/// Provides a display geometry through an ordered set of locations.
///
/// Never consulted by the solver.
pub trait GeometryProvider {
    /// When `optimize_order` is set the engine may reorder intermediate
    /// waypoints; the first location stays the origin.
    fn geometry_for(
        &self,
        locations: &[(f64, f64)],
        optimize_order: bool,
        profile: &TravelProfile,
    ) -> Result<Polyline, ProviderError>;
}

/// Source of "now" for date defaults and session staleness.
pub trait Clock {
    /// Seconds since the unix epoch.
    fn now_unix(&self) -> i64;

    /// Today's date (unix timestamp, date only, UTC).
    fn today(&self) -> i64 {
        let now = self.now_unix();
        now - now.rem_euclid(SECONDS_PER_DAY)
    }
}

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or_default()
    }
}
