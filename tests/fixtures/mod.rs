//! Test fixtures for route-planner.
//!
//! Provides:
//! - Warehouse and buyer locations around Lomé
//! - Delivery/warehouse test types and canned distance providers

#![allow(dead_code)]

pub mod lome_locations;

use std::sync::atomic::{AtomicUsize, Ordering};

use route_planner::error::ProviderError;
use route_planner::polyline::Polyline;
use route_planner::traits::{Clock, DistanceMatrixProvider, GeometryProvider, Metric, Stop, TravelProfile};

pub use lome_locations::*;

pub const DAY: i64 = 86_400;

#[derive(Clone, Debug)]
pub struct TestDelivery {
    pub id: u32,
    pub label: String,
    pub location: Option<(f64, f64)>,
}

impl TestDelivery {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            label: format!("delivery {id}"),
            location: None,
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some((lat, lng));
        self
    }

    pub fn to(id: u32, location: &Location) -> Self {
        Self {
            id,
            label: location.name.to_string(),
            location: Some(location.coords()),
        }
    }
}

impl Stop for TestDelivery {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Clone, Debug)]
pub struct TestWarehouse {
    pub id: &'static str,
    pub location: Option<(f64, f64)>,
}

impl TestWarehouse {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self { id: "warehouse", location: Some((lat, lng)) }
    }

    pub fn unmapped() -> Self {
        Self { id: "warehouse", location: None }
    }

    pub fn named(location: &Location) -> Self {
        Self { id: location.name, location: Some(location.coords()) }
    }
}

impl Stop for TestWarehouse {
    type Id = &'static str;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    fn label(&self) -> &str {
        self.id
    }
}

/// Returns the same canned matrix for any request and counts calls.
pub struct CannedMatrix {
    pub rows: Vec<Vec<f64>>,
    pub calls: AtomicUsize,
}

impl CannedMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistanceMatrixProvider for CannedMatrix {
    fn matrix_for(
        &self,
        _locations: &[(f64, f64)],
        _metric: Metric,
        _profile: &TravelProfile,
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.clone())
    }
}

/// Fails every request with a 503.
pub struct Unavailable;

impl DistanceMatrixProvider for Unavailable {
    fn matrix_for(
        &self,
        _locations: &[(f64, f64)],
        _metric: Metric,
        _profile: &TravelProfile,
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        Err(ProviderError::Status(503))
    }
}

impl GeometryProvider for Unavailable {
    fn geometry_for(
        &self,
        _locations: &[(f64, f64)],
        _optimize_order: bool,
        _profile: &TravelProfile,
    ) -> Result<Polyline, ProviderError> {
        Err(ProviderError::Status(503))
    }
}

/// Straight segments between the requested waypoints.
pub struct StraightLines;

impl GeometryProvider for StraightLines {
    fn geometry_for(
        &self,
        locations: &[(f64, f64)],
        _optimize_order: bool,
        _profile: &TravelProfile,
    ) -> Result<Polyline, ProviderError> {
        Ok(Polyline::new(locations.to_vec()))
    }
}

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// Depot at index 0 with three stops; nearest-neighbor gives [0, 1, 3, 2].
pub fn golden_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 2.0, 9.0, 10.0],
        vec![1.0, 0.0, 6.0, 4.0],
        vec![15.0, 7.0, 0.0, 8.0],
        vec![6.0, 3.0, 12.0, 0.0],
    ]
}

/// Three deliveries with distinct, valid coordinates matching `golden_matrix`.
pub fn golden_deliveries() -> Vec<TestDelivery> {
    vec![
        TestDelivery::new(101).at(6.14, 1.21),
        TestDelivery::new(102).at(6.15, 1.22),
        TestDelivery::new(103).at(6.16, 1.23),
    ]
}

pub fn depot() -> TestWarehouse {
    TestWarehouse::at(6.1375, 1.2870)
}
