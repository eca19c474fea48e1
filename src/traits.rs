//! Collaborator interfaces for route lookup and geocoding.
//!
//! The planner only depends on these traits; concrete adapters live in
//! [`crate::osrm`], [`crate::haversine`] and [`crate::nominatim`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::polyline::Polyline;
use crate::road::RoadType;

/// A single routing instruction as returned by a routing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Road reference such as `A2` or `DK50`; empty when absent.
    pub reference: String,
    /// Street or road name; empty when absent.
    pub name: String,
    /// Travel mode, e.g. `driving` or `ferry`.
    pub mode: String,
    /// Maneuver type, e.g. `turn` or `ferry`.
    pub maneuver: String,
    pub distance_m: f64,
}

/// Raw route between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetails {
    pub shape: Polyline,
    pub steps: Vec<RouteStep>,
    pub total_distance_km: f64,
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no route found between the given points")]
    NoRoute,
    #[error("average speed for {road_type:?} must be positive, got {speed}")]
    InvalidSpeed { road_type: RoadType, speed: f64 },
}

/// Provides a road route between two (lat, lng) points.
pub trait RouteProvider {
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<RouteDetails, RouteError>;
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder returned malformed coordinates: {0}")]
    MalformedCoordinate(String),
}

/// Resolves addresses to coordinates and back.
pub trait Geocoder {
    /// First match for `query`, if any.
    fn forward(&self, query: &str) -> Result<Option<(f64, f64)>, GeocodeError>;

    /// Short human-readable label for a coordinate.
    fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeocodeError>;
}
