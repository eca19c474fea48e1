//! Route shape as decoded coordinates.
//!
//! Routing engines speak GeoJSON, which orders coordinates as `[lng, lat]`.
//! The swap to `(lat, lng)` happens here, once, at the boundary.

use serde::{Deserialize, Serialize};

use crate::haversine::haversine_km;

/// Route geometry as (latitude, longitude) points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Build from GeoJSON `[lng, lat]` pairs. Pairs with fewer than two
    /// values are skipped.
    pub fn from_lng_lat(coordinates: &[Vec<f64>]) -> Self {
        let points = coordinates
            .iter()
            .filter_map(|pair| match pair.as_slice() {
                [lng, lat, ..] => Some((*lat, *lng)),
                _ => None,
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Great-circle length along the shape.
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]))
            .sum()
    }
}
