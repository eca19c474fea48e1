//! Test fixtures for truck-hours.
//!
//! Provides real Polish freight hub locations and route step builders.

#![allow(dead_code)]

pub mod polish_locations;

pub use polish_locations::*;

use truck_hours::traits::RouteStep;

/// A driving step with the given ref and name.
pub fn step(reference: &str, name: &str, distance_km: f64) -> RouteStep {
    RouteStep {
        reference: reference.to_string(),
        name: name.to_string(),
        mode: "driving".to_string(),
        maneuver: "turn".to_string(),
        distance_m: distance_km * 1000.0,
    }
}

/// A ferry crossing step.
pub fn ferry(name: &str, distance_km: f64) -> RouteStep {
    RouteStep {
        reference: String::new(),
        name: name.to_string(),
        mode: "ferry".to_string(),
        maneuver: "notification".to_string(),
        distance_m: distance_km * 1000.0,
    }
}
