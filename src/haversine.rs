//! Haversine route provider (fallback when OSRM is unavailable).
//!
//! Produces a single straight-line step stretched by a detour factor.
//! Less accurate than OSRM (ignores roads) but always available.

use crate::polyline::Polyline;
use crate::road::RoadType;
use crate::traits::{RouteDetails, RouteError, RouteProvider, RouteStep};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Typical ratio of road distance to straight-line distance.
const DEFAULT_DETOUR_FACTOR: f64 = 1.3;

/// Great-circle distance between two (lat, lng) points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Straight-line route estimate.
#[derive(Debug, Clone)]
pub struct HaversineRoute {
    /// Multiplier applied to the great-circle distance.
    pub detour_factor: f64,
    /// Road type the whole estimate is booked under.
    pub road_type: RoadType,
}

impl Default for HaversineRoute {
    fn default() -> Self {
        Self {
            detour_factor: DEFAULT_DETOUR_FACTOR,
            road_type: RoadType::National,
        }
    }
}

impl HaversineRoute {
    pub fn new(detour_factor: f64, road_type: RoadType) -> Self {
        Self {
            detour_factor,
            road_type,
        }
    }

    fn reference(&self) -> &'static str {
        // Picked so the step classifies back to `road_type`.
        match self.road_type {
            RoadType::Highway => "A0",
            RoadType::National => "DK0",
            RoadType::City | RoadType::Ferry => "",
        }
    }
}

impl RouteProvider for HaversineRoute {
    fn route_between(&self, from: (f64, f64), to: (f64, f64)) -> Result<RouteDetails, RouteError> {
        let distance_km = haversine_km(from, to) * self.detour_factor;
        let mode = if self.road_type == RoadType::Ferry {
            "ferry"
        } else {
            "driving"
        };

        Ok(RouteDetails {
            shape: Polyline::new(vec![from, to]),
            steps: vec![RouteStep {
                reference: self.reference().to_string(),
                name: String::new(),
                mode: mode.to_string(),
                maneuver: "depart".to_string(),
                distance_m: distance_km * 1000.0,
            }],
            total_distance_km: distance_km,
        })
    }
}
