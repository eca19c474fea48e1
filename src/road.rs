//! Road-type classification of route steps and per-type speed tables.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::traits::{RouteError, RouteStep};

static HIGHWAY_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(A|S)\s?\d+").expect("valid highway ref pattern"));

static NATIONAL_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(DK|DW|E)\s?\d+").expect("valid national ref pattern"));

/// Label used when a step carries neither a ref nor a name.
pub const UNNAMED_ROAD: &str = "Unnamed road";

/// Road category used to pick an average speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadType {
    Highway,
    National,
    City,
    Ferry,
}

impl RoadType {
    /// Reporting order.
    pub const ALL: [RoadType; 4] = [
        RoadType::Highway,
        RoadType::National,
        RoadType::City,
        RoadType::Ferry,
    ];
}

/// Average speed per road type in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedConfig {
    pub highway_kmh: f64,
    pub national_kmh: f64,
    pub city_kmh: f64,
    pub ferry_kmh: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            highway_kmh: 80.0,
            national_kmh: 64.0,
            city_kmh: 30.0,
            ferry_kmh: 15.0,
        }
    }
}

impl SpeedConfig {
    pub fn speed_for(&self, road_type: RoadType) -> f64 {
        match road_type {
            RoadType::Highway => self.highway_kmh,
            RoadType::National => self.national_kmh,
            RoadType::City => self.city_kmh,
            RoadType::Ferry => self.ferry_kmh,
        }
    }

    /// Every speed must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), RouteError> {
        for road_type in RoadType::ALL {
            let speed = self.speed_for(road_type);
            if !speed.is_finite() || speed <= 0.0 {
                return Err(RouteError::InvalidSpeed { road_type, speed });
            }
        }
        Ok(())
    }
}

/// A run of consecutive steps on the same named road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedSegment {
    pub name: String,
    pub road_type: RoadType,
    pub distance_km: f64,
    pub duration_minutes: u32,
}

/// Total distance on one road type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadTypeTotal {
    pub road_type: RoadType,
    pub distance_km: f64,
}

/// Classify a single routing step.
///
/// Highway refs look like `A2` or `S 8`, national ones like `DK50`, `DW 92`
/// or `E30`. Any other ref containing a digit still counts as national.
pub fn classify_step(reference: &str, name: &str, mode: &str, maneuver: &str) -> RoadType {
    let upper_ref = reference.to_uppercase();
    let upper_name = name.to_uppercase();

    if mode == "ferry" || maneuver == "ferry" || upper_name.contains("PROM") {
        RoadType::Ferry
    } else if HIGHWAY_REF.is_match(&upper_ref)
        || upper_name.contains("AUTOSTRADA")
        || upper_name.contains("DROGA EKSPRESOWA")
    {
        RoadType::Highway
    } else if NATIONAL_REF.is_match(&upper_ref)
        || upper_ref.chars().any(|c| c.is_ascii_digit())
    {
        RoadType::National
    } else {
        RoadType::City
    }
}

/// Merge consecutive steps sharing a display name and road type.
pub fn merge_steps(steps: &[RouteStep], speeds: &SpeedConfig) -> Vec<DetailedSegment> {
    let mut segments = Vec::new();
    let mut current: Option<(String, RoadType, f64)> = None;

    for step in steps {
        let road_type = classify_step(&step.reference, &step.name, &step.mode, &step.maneuver);
        let name = display_name(step);

        match current.as_mut() {
            Some((current_name, current_type, meters))
                if *current_name == name && *current_type == road_type =>
            {
                *meters += step.distance_m;
            }
            _ => {
                if let Some(done) = current.take() {
                    segments.push(finalize_segment(done, speeds));
                }
                current = Some((name, road_type, step.distance_m));
            }
        }
    }

    if let Some(done) = current {
        segments.push(finalize_segment(done, speeds));
    }
    segments
}

fn display_name(step: &RouteStep) -> String {
    if !step.reference.is_empty() {
        step.reference.clone()
    } else if !step.name.is_empty() {
        step.name.clone()
    } else {
        UNNAMED_ROAD.to_string()
    }
}

fn finalize_segment(
    (name, road_type, meters): (String, RoadType, f64),
    speeds: &SpeedConfig,
) -> DetailedSegment {
    let distance_km = round_tenth(meters / 1000.0);
    let speed = speeds.speed_for(road_type);
    let duration_minutes = if speed > 0.0 {
        (distance_km / speed * 60.0).round() as u32
    } else {
        0
    };
    DetailedSegment {
        name,
        road_type,
        distance_km,
        duration_minutes,
    }
}

/// Per-type distance totals, skipping types with no distance.
pub fn totals_by_type(segments: &[DetailedSegment]) -> Vec<RoadTypeTotal> {
    RoadType::ALL
        .iter()
        .map(|&road_type| RoadTypeTotal {
            road_type,
            distance_km: round_tenth(
                segments
                    .iter()
                    .filter(|segment| segment.road_type == road_type)
                    .map(|segment| segment.distance_km)
                    .sum(),
            ),
        })
        .filter(|total| total.distance_km > 0.0)
        .collect()
}

/// Sum of distance / speed over the totals.
pub fn pure_driving_hours(
    totals: &[RoadTypeTotal],
    speeds: &SpeedConfig,
) -> Result<f64, RouteError> {
    speeds.validate()?;
    Ok(totals
        .iter()
        .map(|total| total.distance_km / speeds.speed_for(total.road_type))
        .sum())
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(reference: &str, name: &str, distance_m: f64) -> RouteStep {
        RouteStep {
            reference: reference.to_string(),
            name: name.to_string(),
            mode: "driving".to_string(),
            maneuver: "turn".to_string(),
            distance_m,
        }
    }

    #[test]
    fn test_classify_highway_refs() {
        assert_eq!(classify_step("A2", "", "driving", "turn"), RoadType::Highway);
        assert_eq!(classify_step("E30; A2", "", "driving", "turn"), RoadType::Highway);
        assert_eq!(classify_step("s 8", "", "driving", "turn"), RoadType::Highway);
        // Non-breaking space between letter and number.
        assert_eq!(classify_step("S\u{a0}8", "", "driving", "turn"), RoadType::Highway);
        assert_eq!(
            classify_step("", "Autostrada Wolności", "driving", "turn"),
            RoadType::Highway
        );
    }

    #[test]
    fn test_classify_national_refs() {
        assert_eq!(classify_step("DK50", "", "driving", "turn"), RoadType::National);
        assert_eq!(classify_step("DW 719", "", "driving", "turn"), RoadType::National);
        assert_eq!(classify_step("92", "", "driving", "turn"), RoadType::National);
        // "A" inside a word does not start a highway ref.
        assert_eq!(classify_step("BA12", "", "driving", "turn"), RoadType::National);
    }

    #[test]
    fn test_classify_ferry_and_city() {
        assert_eq!(classify_step("", "", "ferry", "depart"), RoadType::Ferry);
        assert_eq!(classify_step("", "", "driving", "ferry"), RoadType::Ferry);
        assert_eq!(classify_step("A1", "Prom Świnoujście", "driving", "turn"), RoadType::Ferry);
        assert_eq!(classify_step("", "Marszałkowska", "driving", "turn"), RoadType::City);
        assert_eq!(classify_step("", "", "driving", "turn"), RoadType::City);
    }

    #[test]
    fn test_merge_groups_consecutive_steps() {
        let steps = vec![
            step("A2", "", 40_000.0),
            step("A2", "", 40_000.0),
            step("", "Długa", 1_500.0),
            step("", "", 500.0),
        ];
        let segments = merge_steps(&steps, &SpeedConfig::default());

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].name, "A2");
        assert_eq!(segments[0].distance_km, 80.0);
        assert_eq!(segments[0].duration_minutes, 60);
        assert_eq!(segments[1].road_type, RoadType::City);
        assert_eq!(segments[2].name, UNNAMED_ROAD);
    }

    #[test]
    fn test_totals_skip_empty_types() {
        let steps = vec![step("A2", "", 80_000.0), step("DK92", "", 64_000.0)];
        let segments = merge_steps(&steps, &SpeedConfig::default());
        let totals = totals_by_type(&segments);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].road_type, RoadType::Highway);
        assert_eq!(totals[1].road_type, RoadType::National);

        let hours = pure_driving_hours(&totals, &SpeedConfig::default()).unwrap();
        assert!((hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_speed_is_data_error() {
        let speeds = SpeedConfig {
            ferry_kmh: 0.0,
            ..SpeedConfig::default()
        };
        assert!(matches!(
            speeds.validate(),
            Err(RouteError::InvalidSpeed {
                road_type: RoadType::Ferry,
                ..
            })
        ));
    }
}
