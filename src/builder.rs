//! Route builder: validate stops, fetch the matrix, solve, map back.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{BuildError, ProviderError};
use crate::matrix::DistanceMatrix;
use crate::route::{Route, RouteStop};
use crate::solver::{SolveOptions, solve_with};
use crate::traits::{DistanceMatrixProvider, Metric, Stop, TravelProfile};

/// Below this many routable stops there is nothing to optimize.
pub const MIN_STOPS: usize = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub metric: Metric,
    pub profile: TravelProfile,
    pub min_stops: usize,
    pub local_search_iterations: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            metric: Metric::Distance,
            profile: TravelProfile::default(),
            min_stops: MIN_STOPS,
            local_search_iterations: 0,
        }
    }
}

/// Cooperative cancellation flag shared with the request that owns a build.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Turns a depot and candidate stops into a solved [`Route`].
pub struct RouteBuilder<'a, M> {
    provider: &'a M,
    options: BuildOptions,
}

impl<'a, M: DistanceMatrixProvider> RouteBuilder<'a, M> {
    pub fn new(provider: &'a M, options: BuildOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn build<D, S>(&self, depot: &D, candidates: &[S]) -> Result<Route<S::Id>, BuildError>
    where
        D: Stop,
        S: Stop,
    {
        self.build_cancellable(depot, candidates, &CancelToken::new())
    }

    /// Builds a route, giving up if `cancel` fires around the provider call.
    ///
    /// Either a complete route or an error is returned; nothing is published
    /// on the way.
    pub fn build_cancellable<D, S>(
        &self,
        depot: &D,
        candidates: &[S],
        cancel: &CancelToken,
    ) -> Result<Route<S::Id>, BuildError>
    where
        D: Stop,
        S: Stop,
    {
        let depot_location = depot
            .routable_location()
            .ok_or(BuildError::MissingDepotCoordinates)?;

        let stops = routable_stops(candidates);
        if stops.len() < self.options.min_stops {
            info!(
                valid = stops.len(),
                required = self.options.min_stops,
                "not enough stops to optimize"
            );
            return Err(BuildError::InsufficientStops {
                valid: stops.len(),
                required: self.options.min_stops,
            });
        }

        let locations: Vec<(f64, f64)> = std::iter::once(depot_location)
            .chain(stops.iter().map(|(_, location)| *location))
            .collect();

        if cancel.is_cancelled() {
            return Err(BuildError::Cancelled);
        }
        let rows = self
            .provider
            .matrix_for(&locations, self.options.metric, &self.options.profile)
            .inspect_err(|err| warn!(error = %err, locations = locations.len(), "distance provider failed"))?;
        if cancel.is_cancelled() {
            debug!("build cancelled after distance provider returned");
            return Err(BuildError::Cancelled);
        }

        let matrix = checked_matrix(rows, locations.len())?;
        let order = solve_with(
            &matrix,
            &SolveOptions {
                local_search_iterations: self.options.local_search_iterations,
            },
        );

        let route = assemble(depot_location, depot.label(), &stops, &matrix, &order, self.options.metric);
        debug!(
            stops = route.stops.len(),
            total_cost = route.total_cost,
            "route built"
        );
        Ok(route)
    }
}

/// Builds a route with default options.
pub fn build_route<D, S, M>(depot: &D, candidates: &[S], provider: &M) -> Result<Route<S::Id>, BuildError>
where
    D: Stop,
    S: Stop,
    M: DistanceMatrixProvider,
{
    RouteBuilder::new(provider, BuildOptions::default()).build(depot, candidates)
}

fn routable_stops<S: Stop>(candidates: &[S]) -> Vec<(&S, (f64, f64))> {
    candidates
        .iter()
        .filter_map(|stop| match stop.routable_location() {
            Some(location) => Some((stop, location)),
            None => {
                debug!(label = stop.label(), "skipping stop without coordinates");
                None
            }
        })
        .collect()
}

fn checked_matrix(rows: Vec<Vec<f64>>, expected: usize) -> Result<DistanceMatrix, ProviderError> {
    if rows.len() != expected {
        return Err(ProviderError::Malformed(format!(
            "expected {expected}x{expected} matrix, got {} rows",
            rows.len()
        )));
    }
    Ok(DistanceMatrix::new(rows)?)
}

fn assemble<S: Stop>(
    depot: (f64, f64),
    depot_label: &str,
    stops: &[(&S, (f64, f64))],
    matrix: &DistanceMatrix,
    order: &[usize],
    metric: Metric,
) -> Route<S::Id> {
    let mut route_stops = Vec::with_capacity(stops.len());
    let mut total_cost = 0.0;

    for pair in order.windows(2) {
        let (prev, index) = (pair[0], pair[1]);
        let leg_cost = matrix.get(prev, index);
        total_cost += leg_cost;

        let (stop, location) = stops[index - 1];
        route_stops.push(RouteStop {
            id: stop.id().clone(),
            label: stop.label().to_string(),
            location,
            leg_cost,
        });
    }

    Route {
        depot,
        depot_label: depot_label.to_string(),
        stops: route_stops,
        total_cost,
        metric,
    }
}
