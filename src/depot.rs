//! Depot selection.
//!
//! Choosing the warehouse a route starts from is kept apart from the solver.

use crate::haversine::haversine_km;
use crate::traits::{Stop, is_valid_coordinate};

/// Finds the warehouse closest to a location.
pub trait DepotLocator {
    type Depot: Stop;

    /// `None` when `location` is not routable or no warehouse qualifies.
    fn nearest_to(&self, location: Option<(f64, f64)>) -> Option<&Self::Depot>;
}

/// Great-circle nearest warehouse over a fixed list.
#[derive(Debug, Clone)]
pub struct NearestDepot<D> {
    depots: Vec<D>,
}

impl<D: Stop> NearestDepot<D> {
    /// Warehouses without routable coordinates are dropped.
    pub fn new(depots: impl IntoIterator<Item = D>) -> Self {
        Self {
            depots: depots
                .into_iter()
                .filter(|depot| depot.routable_location().is_some())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.depots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depots.is_empty()
    }
}

impl<D: Stop> DepotLocator for NearestDepot<D> {
    type Depot = D;

    fn nearest_to(&self, location: Option<(f64, f64)>) -> Option<&D> {
        let origin = location.filter(|&(lat, lng)| is_valid_coordinate(lat, lng))?;

        let mut best: Option<(&D, f64)> = None;
        for depot in &self.depots {
            let Some(position) = depot.routable_location() else {
                continue;
            };
            let km = haversine_km(origin, position);
            match best {
                Some((_, best_km)) if km >= best_km => {}
                _ => best = Some((depot, km)),
            }
        }
        best.map(|(depot, _)| depot)
    }
}

/// First warehouse with routable coordinates among the ones assigned to a
/// courier's deliveries, in delivery order.
pub fn first_routable<'a, D: Stop + 'a>(
    assigned: impl IntoIterator<Item = Option<&'a D>>,
) -> Option<&'a D> {
    assigned
        .into_iter()
        .flatten()
        .find(|depot| depot.routable_location().is_some())
}
