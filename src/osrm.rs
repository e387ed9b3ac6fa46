//! OSRM HTTP adapter for distance matrices and route geometry.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::polyline::Polyline;
use crate::traits::{DistanceMatrixProvider, GeometryProvider, Metric, TravelProfile};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    /// Applies to the whole request, connect included.
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Reads `OSRM_BASE_URL` and `OSRM_TIMEOUT_SECS`, keeping defaults for
    /// unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup("OSRM_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = lookup("OSRM_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "ignoring invalid OSRM_TIMEOUT_SECS"),
            }
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, service: &str, profile: &TravelProfile, locations: &[(f64, f64)], query: &str) -> String {
        format!(
            "{}/{}/v1/{}/{}?{}",
            self.config.base_url,
            service,
            profile.as_str(),
            coordinates_path(locations),
            query
        )
    }

    fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        debug!(url, "OSRM request");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            // OSRM reports unroutable input as 400 with a JSON code
            if let Ok(body) = response.json::<OsrmStatus>() {
                if body.code != "Ok" {
                    return Err(ProviderError::NoRoute { code: body.code });
                }
            }
            return Err(ProviderError::Status(status.as_u16()));
        }
        Ok(response.json()?)
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(
        &self,
        locations: &[(f64, f64)],
        metric: Metric,
        profile: &TravelProfile,
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let annotation = match metric {
            Metric::Distance => "distance",
            Metric::Duration => "duration",
        };
        let url = self.url("table", profile, locations, &format!("annotations={annotation}"));
        let body: OsrmTableResponse = self.get(&url)?;
        if body.code != "Ok" {
            return Err(ProviderError::NoRoute { code: body.code });
        }

        let rows = match metric {
            Metric::Distance => body.distances,
            Metric::Duration => body.durations,
        }
        .ok_or_else(|| ProviderError::Malformed(format!("table response has no {annotation}s")))?;

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(j, value)| {
                        value.ok_or_else(|| {
                            ProviderError::Malformed(format!("no {annotation} from location {i} to {j}"))
                        })
                    })
                    .collect::<Result<Vec<f64>, _>>()
            })
            .collect()
    }
}

impl GeometryProvider for OsrmClient {
    fn geometry_for(
        &self,
        locations: &[(f64, f64)],
        optimize_order: bool,
        profile: &TravelProfile,
    ) -> Result<Polyline, ProviderError> {
        if locations.len() < 2 {
            return Ok(Polyline::new(locations.to_vec()));
        }

        let geometry = if optimize_order {
            let url = self.url(
                "trip",
                profile,
                locations,
                // without a round trip OSRM only accepts first/last endpoints
                "source=first&destination=last&roundtrip=false&geometries=geojson&overview=full",
            );
            let body: OsrmTripResponse = self.get(&url)?;
            if body.code != "Ok" {
                return Err(ProviderError::NoRoute { code: body.code });
            }
            body.trips.into_iter().next().map(|path| path.geometry)
        } else {
            let url = self.url("route", profile, locations, "geometries=geojson&overview=full");
            let body: OsrmRouteResponse = self.get(&url)?;
            if body.code != "Ok" {
                return Err(ProviderError::NoRoute { code: body.code });
            }
            body.routes.into_iter().next().map(|path| path.geometry)
        };

        let geometry =
            geometry.ok_or_else(|| ProviderError::Malformed("response has no geometry".to_string()))?;
        Ok(Polyline::from_lng_lat(&geometry.coordinates))
    }
}

/// OSRM expects `lng,lat` pairs joined by `;`.
fn coordinates_path(locations: &[(f64, f64)]) -> String {
    locations
        .iter()
        .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
        .collect::<Vec<_>>()
        .join(";")
}

#[derive(Debug, Deserialize)]
struct OsrmStatus {
    code: String,
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    distances: Option<Vec<Vec<Option<f64>>>>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonLineString {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmPath {
    geometry: GeoJsonLineString,
}

#[derive(Debug, Deserialize)]
struct OsrmTripResponse {
    code: String,
    #[serde(default)]
    trips: Vec<OsrmPath>,
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmPath>,
}
