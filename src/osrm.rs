//! OSRM HTTP adapter for turn-by-turn routes.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;
use crate::traits::{RouteDetails, RouteError, RouteProvider, RouteStep};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
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

    fn route_url(&self, from: (f64, f64), to: (f64, f64)) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson&steps=true",
            self.config.base_url, self.config.profile, from.1, from.0, to.1, to.0
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<RouteDetails, RouteError> {
        let body = self
            .client
            .get(self.route_url(from, to))
            .send()?
            .error_for_status()?
            .json::<OsrmRouteResponse>()?;

        body.into_details().ok_or_else(|| {
            tracing::warn!(?from, ?to, "OSRM returned no routes");
            RouteError::NoRoute
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    #[serde(default, rename = "ref")]
    reference: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    maneuver: Option<OsrmManeuver>,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl OsrmRouteResponse {
    /// First route only; alternatives are ignored.
    pub(crate) fn into_details(self) -> Option<RouteDetails> {
        let route = self.routes.into_iter().next()?;
        let steps = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| RouteStep {
                reference: step.reference.unwrap_or_default(),
                name: step.name.unwrap_or_default(),
                mode: step.mode.unwrap_or_default(),
                maneuver: step
                    .maneuver
                    .and_then(|maneuver| maneuver.kind)
                    .unwrap_or_default(),
                distance_m: step.distance,
            })
            .collect();

        Some(RouteDetails {
            shape: Polyline::from_lng_lat(&route.geometry.coordinates),
            steps,
            total_distance_km: crate::road::round_tenth(route.distance / 1000.0),
        })
    }
}
