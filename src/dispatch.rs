//! Optimization workflow: build a courier's route, attach display geometry,
//! publish it to the session and serve it back to the detail view.

use std::collections::HashSet;
use std::hash::Hash;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::builder::{BuildOptions, CancelToken, RouteBuilder};
use crate::error::{BuildError, DispatchError, RouteNotFound};
use crate::polyline::Polyline;
use crate::route::{Route, RouteSummary};
use crate::session::RouteSessionStore;
use crate::traits::{Clock, DistanceMatrixProvider, GeometryProvider, Stop, SystemClock};

/// One courier's optimization request.
#[derive(Debug)]
pub struct OptimizeRequest<'a, C, D, S> {
    pub courier: C,
    /// Target date (unix timestamp, date only); today when `None`.
    pub date: Option<i64>,
    pub depot: Option<&'a D>,
    pub deliveries: &'a [S],
}

/// Runs optimizations for couriers and keeps the latest route of each.
pub struct Dispatcher<M, C, Id, K = SystemClock> {
    provider: M,
    geometry: Option<Box<dyn GeometryProvider + Send + Sync>>,
    options: BuildOptions,
    sessions: RouteSessionStore<C, Id, K>,
}

impl<M, C, Id, K> Dispatcher<M, C, Id, K>
where
    M: DistanceMatrixProvider,
    C: Clone + Eq + Hash + std::fmt::Debug,
    Id: Clone,
    K: Clock,
{
    pub fn new(provider: M, options: BuildOptions, sessions: RouteSessionStore<C, Id, K>) -> Self {
        Self {
            provider,
            geometry: None,
            options,
            sessions,
        }
    }

    /// Fetch a display path for every stored route.
    pub fn with_geometry(mut self, geometry: impl GeometryProvider + Send + Sync + 'static) -> Self {
        self.geometry = Some(Box::new(geometry));
        self
    }

    pub fn provider(&self) -> &M {
        &self.provider
    }

    pub fn sessions(&self) -> &RouteSessionStore<C, Id, K> {
        &self.sessions
    }

    /// Optimizes and publishes a route.
    ///
    /// On any failure the courier's session slot is left as it was.
    pub fn optimize<D, S>(
        &self,
        request: &OptimizeRequest<'_, C, D, S>,
        cancel: &CancelToken,
    ) -> Result<RouteSummary<Id>, DispatchError>
    where
        D: Stop,
        S: Stop<Id = Id>,
    {
        let date = request.date.unwrap_or_else(|| self.sessions.clock().today());
        let depot = request.depot.ok_or(DispatchError::NoDepot)?;

        let builder = RouteBuilder::new(&self.provider, self.options.clone());
        let route = builder
            .build_cancellable(depot, request.deliveries, cancel)
            .inspect_err(|err| {
                if err.is_informational() {
                    info!(courier = ?request.courier, date, reason = %err, "nothing to optimize");
                } else {
                    warn!(courier = ?request.courier, date, error = %err, "route optimization failed");
                }
            })?;

        let geometry = self.fetch_geometry(&route);
        if cancel.is_cancelled() {
            return Err(BuildError::Cancelled.into());
        }

        let summary = RouteSummary::new(date, &route, geometry.as_ref());
        info!(
            courier = ?request.courier,
            date,
            stops = route.stops.len(),
            total_cost = route.total_cost,
            "route optimized"
        );
        self.sessions.store(&request.courier, date, route, geometry);
        Ok(summary)
    }

    /// The route last published for `courier` on `date`.
    pub fn detail(&self, courier: &C, date: i64) -> Result<RouteSummary<Id>, RouteNotFound> {
        let entry = self.sessions.fetch(courier, date)?;
        Ok(RouteSummary::new(entry.date, &entry.route, entry.geometry.as_ref()))
    }

    fn fetch_geometry(&self, route: &Route<Id>) -> Option<Polyline> {
        let provider = self.geometry.as_ref()?;
        // waypoints are already in visiting order
        match provider.geometry_for(&route.waypoints(), false, &self.options.profile) {
            Ok(polyline) => Some(polyline),
            Err(err) => {
                warn!(error = %err, "route geometry unavailable");
                None
            }
        }
    }
}

impl<M, C, Id, K> Dispatcher<M, C, Id, K>
where
    M: DistanceMatrixProvider + Sync,
    C: Clone + Eq + Hash + std::fmt::Debug + Send + Sync,
    Id: Clone + Send + Sync,
    K: Clock + Sync,
{
    /// Optimizes independent couriers in parallel.
    ///
    /// A courier appearing more than once keeps its first request; the
    /// others fail with [`DispatchError::DuplicateCourier`]. Results follow
    /// request order.
    pub fn optimize_many<D, S>(
        &self,
        requests: &[OptimizeRequest<'_, C, D, S>],
        cancel: &CancelToken,
    ) -> Vec<Result<RouteSummary<Id>, DispatchError>>
    where
        D: Stop + Sync,
        S: Stop<Id = Id> + Sync,
    {
        let mut seen = HashSet::new();
        let first_occurrence: Vec<bool> = requests
            .iter()
            .map(|request| seen.insert(request.courier.clone()))
            .collect();

        requests
            .par_iter()
            .zip(first_occurrence.par_iter())
            .map(|(request, &first)| {
                if !first {
                    return Err(DispatchError::DuplicateCourier);
                }
                self.optimize(request, cancel)
            })
            .collect()
    }
}
