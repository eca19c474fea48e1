//! Delivery time planning: route lookup, road classification and the
//! driver schedule chained together.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::driver_rules::{simulate, DrivingPolicy, LogisticsSchedule, ScheduleError};
use crate::polyline::Polyline;
use crate::road::{
    merge_steps, pure_driving_hours, totals_by_type, DetailedSegment, RoadTypeTotal, SpeedConfig,
};
use crate::traits::{RouteError, RouteProvider};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerOptions {
    pub speeds: SpeedConfig,
    pub policy: DrivingPolicy,
}

/// A trip to plan, as (lat, lng) endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub shape: Polyline,
    pub segments: Vec<DetailedSegment>,
    pub totals: Vec<RoadTypeTotal>,
    pub total_distance_km: f64,
    pub driving_hours: f64,
    pub schedule: LogisticsSchedule,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub fn plan_delivery<P>(
    provider: &P,
    trip: TripRequest,
    options: &PlannerOptions,
) -> Result<DeliveryEstimate, PlanError>
where
    P: RouteProvider + ?Sized,
{
    // Fail before any network call.
    options.speeds.validate()?;

    let route = provider.route_between(trip.from, trip.to)?;
    if route.steps.is_empty() {
        tracing::warn!(from = ?trip.from, to = ?trip.to, "route has no steps");
        return Err(RouteError::NoRoute.into());
    }

    let segments = merge_steps(&route.steps, &options.speeds);
    let totals = totals_by_type(&segments);
    let driving_hours = pure_driving_hours(&totals, &options.speeds)?;
    let schedule = simulate(driving_hours, &options.policy)?;

    tracing::debug!(
        distance_km = route.total_distance_km,
        segments = segments.len(),
        driving_hours,
        total_hours = schedule.total_duration_hours,
        "delivery planned"
    );

    Ok(DeliveryEstimate {
        shape: route.shape,
        segments,
        totals,
        total_distance_km: route.total_distance_km,
        driving_hours,
        schedule,
    })
}

/// Plan several trips in parallel. Results keep the order of `trips`.
pub fn plan_batch<P>(
    provider: &P,
    trips: &[TripRequest],
    options: &PlannerOptions,
) -> Vec<Result<DeliveryEstimate, PlanError>>
where
    P: RouteProvider + Sync + ?Sized,
{
    let results: Vec<_> = trips
        .par_iter()
        .map(|trip| plan_delivery(provider, *trip, options))
        .collect();

    let failed = results.iter().filter(|result| result.is_err()).count();
    tracing::info!(trips = trips.len(), failed, "batch planning finished");
    results
}
