//! Driver hours-of-service simulator.
//!
//! Turns a number of pure driving hours into the real elapsed time a single
//! driver needs once mandatory short breaks and daily rests are inserted.
//! Internally every duration is held in whole milliseconds, so the limits and
//! the 0.001 h boundary tolerance are compared as exact integers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest stint a driver may drive before a short break.
pub const MAX_CONTINUOUS_DRIVING_HOURS: f64 = 4.5;

/// Length of the mandatory short break (45 minutes).
pub const SHORT_BREAK_HOURS: f64 = 0.75;

/// Standard daily driving cap.
pub const STANDARD_DAILY_DRIVING_HOURS: f64 = 9.0;

/// Extended daily driving cap.
pub const EXTENDED_DAILY_DRIVING_HOURS: f64 = 10.0;

/// Regular daily rest.
pub const REGULAR_DAILY_REST_HOURS: f64 = 11.0;

/// Reduced daily rest.
pub const REDUCED_DAILY_REST_HOURS: f64 = 9.0;

/// Boundary tolerance (0.001 h). Leftover driving at or below it needs no
/// further stop, and a stint this close to the daily cap counts as reaching it.
pub const TOLERANCE_HOURS: f64 = 0.001;

/// Timeline entries kept per run; counts and totals are unaffected.
pub const MAX_TIMELINE_ENTRIES: usize = 4096;

// Internal fixed-point unit is the millisecond: every limit above and the
// tolerance are whole numbers of it.
const MS_PER_HOUR: f64 = 3_600_000.0;
const TOLERANCE_MS: u64 = 3_600;
const MAX_CONTINUOUS_DRIVING_MS: u64 = 16_200_000;
const SHORT_BREAK_MS: u64 = 2_700_000;

/// Thresholds governing one simulation run.
///
/// The simulator applies whatever values it is given; the recommended
/// combinations are available through [`DrivingPolicy::standard`] and
/// [`DrivingPolicy::extended`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivingPolicy {
    /// Driving allowed between two daily rests.
    pub max_daily_driving_hours: f64,
    /// Length of the daily rest taken once the daily cap is hit.
    pub daily_rest_hours: f64,
}

impl Default for DrivingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl DrivingPolicy {
    pub fn new(max_daily_driving_hours: f64, daily_rest_hours: f64) -> Self {
        Self {
            max_daily_driving_hours,
            daily_rest_hours,
        }
    }

    /// 9h daily cap with an 11h rest.
    pub fn standard() -> Self {
        Self::new(STANDARD_DAILY_DRIVING_HOURS, REGULAR_DAILY_REST_HOURS)
    }

    /// 10h daily cap with an 11h rest.
    pub fn extended() -> Self {
        Self::new(EXTENDED_DAILY_DRIVING_HOURS, REGULAR_DAILY_REST_HOURS)
    }

    pub fn with_daily_rest(mut self, daily_rest_hours: f64) -> Self {
        self.daily_rest_hours = daily_rest_hours;
        self
    }

    pub fn is_extended(&self) -> bool {
        self.max_daily_driving_hours > STANDARD_DAILY_DRIVING_HOURS
    }

    /// Daily cap and rest in milliseconds.
    fn validate(&self) -> Result<(u64, u64), ScheduleError> {
        let cap = self.max_daily_driving_hours;
        if cap.is_nan() || cap <= 0.0 {
            return Err(ScheduleError::InvalidDailyCap(cap));
        }
        let cap_ms = hours_to_ms(cap).ok_or(ScheduleError::Unrepresentable {
            field: "max_daily_driving_hours",
            value: cap,
        })?;
        if cap_ms == 0 {
            return Err(ScheduleError::Unrepresentable {
                field: "max_daily_driving_hours",
                value: cap,
            });
        }
        let rest = self.daily_rest_hours;
        if !rest.is_finite() || rest < 0.0 {
            return Err(ScheduleError::InvalidDailyRest(rest));
        }
        let rest_ms = hours_to_ms(rest).ok_or(ScheduleError::Unrepresentable {
            field: "daily_rest_hours",
            value: rest,
        })?;
        Ok((cap_ms, rest_ms))
    }
}

/// Rejected simulator input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScheduleError {
    #[error("driving hours must be a finite non-negative number, got {0}")]
    InvalidDrivingHours(f64),
    #[error("daily driving cap must be positive, got {0}")]
    InvalidDailyCap(f64),
    #[error("daily rest duration must be a finite non-negative number, got {0}")]
    InvalidDailyRest(f64),
    /// Valid in principle, but outside the millisecond range the simulator
    /// counts in.
    #[error("{field} = {value} cannot be represented in milliseconds")]
    Unrepresentable { field: &'static str, value: f64 },
}

/// Kind of a scheduled block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Driving,
    ShortBreak,
    DailyRest,
}

/// One block of the computed timeline, in milliseconds from departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub kind: ActivityKind,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl ScheduleEntry {
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_ms as f64 / MS_PER_HOUR
    }
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsSchedule {
    pub total_duration_hours: f64,
    pub driving_time_hours: f64,
    pub break_time_hours: f64,
    pub rest_time_hours: f64,
    pub break_count: u64,
    pub rest_count: u64,
    pub is_extended_driving: bool,
    pub daily_rest_duration: f64,
    /// Stints, breaks and rests in the order they happen, up to
    /// [`MAX_TIMELINE_ENTRIES`].
    pub timeline: Vec<ScheduleEntry>,
    /// Set when the run had more blocks than the timeline keeps.
    pub timeline_truncated: bool,
}

impl LogisticsSchedule {
    fn assemble(
        driving_hours: f64,
        policy: &DrivingPolicy,
        break_count: u64,
        rest_count: u64,
        timeline: Timeline,
    ) -> Self {
        let break_time_hours = break_count as f64 * SHORT_BREAK_HOURS;
        let rest_time_hours = rest_count as f64 * policy.daily_rest_hours;
        Self {
            total_duration_hours: driving_hours + break_time_hours + rest_time_hours,
            driving_time_hours: driving_hours,
            break_time_hours,
            rest_time_hours,
            break_count,
            rest_count,
            is_extended_driving: policy.is_extended(),
            daily_rest_duration: policy.daily_rest_hours,
            timeline: timeline.entries,
            timeline_truncated: timeline.truncated,
        }
    }

    /// Number of driving days (daily rests + 1).
    pub fn driving_days(&self) -> u64 {
        if self.driving_time_hours > TOLERANCE_HOURS {
            self.rest_count + 1
        } else {
            0
        }
    }
}

/// Simulate with the default 9h cap and 11h rest.
pub fn simulate_default(driving_hours: f64) -> Result<LogisticsSchedule, ScheduleError> {
    simulate(driving_hours, &DrivingPolicy::default())
}

/// Build the break/rest schedule for `driving_hours` of pure driving.
pub fn simulate(
    driving_hours: f64,
    policy: &DrivingPolicy,
) -> Result<LogisticsSchedule, ScheduleError> {
    if !driving_hours.is_finite() || driving_hours < 0.0 {
        return Err(ScheduleError::InvalidDrivingHours(driving_hours));
    }
    let (daily_cap, rest_ms) = policy.validate()?;
    let mut remaining = hours_to_ms(driving_hours).ok_or(ScheduleError::Unrepresentable {
        field: "driving_hours",
        value: driving_hours,
    })?;

    let mut timeline = Timeline::default();
    if remaining <= TOLERANCE_MS {
        return Ok(LogisticsSchedule::assemble(driving_hours, policy, 0, 0, timeline));
    }

    let mut driven_today: u64 = 0;
    let mut elapsed: u64 = 0;
    let mut break_count: u64 = 0;
    let mut rest_count: u64 = 0;

    while remaining > TOLERANCE_MS {
        let stint = remaining
            .min(MAX_CONTINUOUS_DRIVING_MS)
            .min(daily_cap - driven_today);

        timeline.push(ActivityKind::Driving, elapsed, stint);
        elapsed = elapsed.saturating_add(stint);
        driven_today += stint;
        remaining -= stint;

        if remaining <= TOLERANCE_MS {
            break;
        }

        if driven_today.saturating_add(TOLERANCE_MS) >= daily_cap {
            timeline.push(ActivityKind::DailyRest, elapsed, rest_ms);
            elapsed = elapsed.saturating_add(rest_ms);
            rest_count += 1;
            driven_today = 0;
        } else if stint == MAX_CONTINUOUS_DRIVING_MS
            || driven_today % MAX_CONTINUOUS_DRIVING_MS < TOLERANCE_MS
        {
            timeline.push(ActivityKind::ShortBreak, elapsed, SHORT_BREAK_MS);
            elapsed = elapsed.saturating_add(SHORT_BREAK_MS);
            break_count += 1;
        }
    }

    tracing::debug!(
        driving_hours,
        break_count,
        rest_count,
        elapsed_ms = elapsed,
        timeline_truncated = timeline.truncated,
        "driver schedule computed"
    );

    Ok(LogisticsSchedule::assemble(
        driving_hours,
        policy,
        break_count,
        rest_count,
        timeline,
    ))
}

#[derive(Debug, Default)]
struct Timeline {
    entries: Vec<ScheduleEntry>,
    truncated: bool,
}

impl Timeline {
    fn push(&mut self, kind: ActivityKind, start_ms: u64, duration_ms: u64) {
        if self.entries.len() < MAX_TIMELINE_ENTRIES {
            self.entries.push(ScheduleEntry {
                kind,
                start_ms,
                duration_ms,
            });
        } else {
            self.truncated = true;
        }
    }
}

/// Milliseconds rounded to nearest; `None` past the `u64` range.
fn hours_to_ms(hours: f64) -> Option<u64> {
    let ms = (hours * MS_PER_HOUR).round();
    if ms.is_finite() && ms < u64::MAX as f64 {
        Some(ms as u64)
    } else {
        None
    }
}
