//! Computed routes and their consumer-facing summary.

use serde::Serialize;
use serde_json::Value;

use crate::polyline::Polyline;
use crate::traits::Metric;

/// One delivery in visiting order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop<Id> {
    pub id: Id,
    pub label: String,
    pub location: (f64, f64),
    /// Cost from the previous point (the depot for the first stop).
    pub leg_cost: f64,
}

/// An open path from the depot through every stop exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<Id> {
    pub depot: (f64, f64),
    pub depot_label: String,
    pub stops: Vec<RouteStop<Id>>,
    pub total_cost: f64,
    pub metric: Metric,
}

impl<Id> Route<Id> {
    pub fn stop_ids(&self) -> impl Iterator<Item = &Id> {
        self.stops.iter().map(|stop| &stop.id)
    }

    /// Depot followed by every stop, in visiting order.
    pub fn waypoints(&self) -> Vec<(f64, f64)> {
        std::iter::once(self.depot)
            .chain(self.stops.iter().map(|stop| stop.location))
            .collect()
    }
}

/// Unit the summary reports costs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    Kilometers,
    Minutes,
}

impl DisplayUnit {
    fn for_metric(metric: Metric) -> Self {
        match metric {
            Metric::Distance => DisplayUnit::Kilometers,
            Metric::Duration => DisplayUnit::Minutes,
        }
    }

    /// Converts meters or seconds into this unit, rounded to 2 decimals.
    fn convert(self, raw: f64) -> f64 {
        let scaled = match self {
            DisplayUnit::Kilometers => raw / 1000.0,
            DisplayUnit::Minutes => raw / 60.0,
        };
        round2(scaled)
    }
}

/// One stop as displayed, costs already converted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopSummary<Id> {
    pub id: Id,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub from_previous: f64,
}

/// What the route detail view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary<Id> {
    /// Target date (unix timestamp, date only).
    pub date: i64,
    pub unit: DisplayUnit,
    pub total: f64,
    pub depot_label: String,
    pub depot_latitude: f64,
    pub depot_longitude: f64,
    pub stops: Vec<StopSummary<Id>>,
    pub geometry: Option<Value>,
}

impl<Id: Clone> RouteSummary<Id> {
    pub fn new(date: i64, route: &Route<Id>, geometry: Option<&Polyline>) -> Self {
        let unit = DisplayUnit::for_metric(route.metric);
        Self {
            date,
            unit,
            total: unit.convert(route.total_cost),
            depot_label: route.depot_label.clone(),
            depot_latitude: route.depot.0,
            depot_longitude: route.depot.1,
            stops: route
                .stops
                .iter()
                .map(|stop| StopSummary {
                    id: stop.id.clone(),
                    label: stop.label.clone(),
                    latitude: stop.location.0,
                    longitude: stop.location.1,
                    from_previous: unit.convert(stop.leg_cost),
                })
                .collect(),
            geometry: geometry.map(Polyline::to_geojson),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
