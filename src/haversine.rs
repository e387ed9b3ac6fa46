//! Haversine distance matrix provider.
//!
//! Great-circle estimate for when no routing engine is reachable, and for
//! deterministic tests. Ignores the road network and the travel profile.

use crate::error::ProviderError;
use crate::traits::{DistanceMatrixProvider, Metric, TravelProfile};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Haversine-based matrix in meters, or seconds at `speed_kmh`.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    pub speed_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    fn cost(&self, km: f64, metric: Metric) -> f64 {
        match metric {
            Metric::Distance => km * 1000.0,
            Metric::Duration => km / self.speed_kmh * 3600.0,
        }
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(
        &self,
        locations: &[(f64, f64)],
        metric: Metric,
        _profile: &TravelProfile,
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        if metric == Metric::Duration && (self.speed_kmh.is_nan() || self.speed_kmh <= 0.0) {
            return Err(ProviderError::Malformed(format!(
                "speed must be positive, got {} km/h",
                self.speed_kmh
            )));
        }

        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    matrix[i][j] = self.cost(haversine_km(*from, *to), metric);
                }
            }
        }

        Ok(matrix)
    }
}
