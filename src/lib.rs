//! truck-hours core
//!
//! Delivery-time estimates for road freight under driving-time and rest
//! rules, with route classification and trip profitability.

pub mod traits;
pub mod driver_rules;
pub mod road;
pub mod planner;
pub mod cost;
pub mod osrm;
pub mod nominatim;
pub mod haversine;
pub mod polyline;
