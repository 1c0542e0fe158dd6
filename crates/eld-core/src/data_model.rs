//! Data model: locations, route legs, duty-status intervals, stops, daily
//! logs, grid segments.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EldError;

/// A point on the route, with an optional display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, name: None }
    }

    pub fn named(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self { latitude, longitude, name: Some(name.into()) }
    }

    pub fn validate(&self) -> Result<(), EldError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(EldError::InputValidation(format!(
                "latitude {} out of range [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(EldError::InputValidation(format!(
                "longitude {} out of range [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Point `fraction` of the way toward `other`, straight-line. Used to
    /// place inserted stops along a leg.
    pub fn lerp(&self, other: &Location, fraction: f64) -> Location {
        let f = fraction.clamp(0.0, 1.0);
        Location {
            latitude: self.latitude + (other.latitude - self.latitude) * f,
            longitude: self.longitude + (other.longitude - self.longitude) * f,
            name: None,
        }
    }

    /// Display string for log sheets: the name when present, coordinates
    /// otherwise.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.4}, {:.4}", self.latitude, self.longitude),
        }
    }
}

/// An ordered segment of the computed route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub start: Location,
    pub end: Location,
    pub distance_miles: f64,
    pub duration_hours: f64,
}

/// Closed set of duty-status categories, serialized as the ELD wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "OFF_DUTY")]
    OffDuty,
    #[serde(rename = "SLEEPER")]
    SleeperBerth,
    #[serde(rename = "DRIVING")]
    Driving,
    #[serde(rename = "ON_DUTY")]
    OnDutyNotDriving,
}

impl DutyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF_DUTY",
            DutyStatus::SleeperBerth => "SLEEPER",
            DutyStatus::Driving => "DRIVING",
            DutyStatus::OnDutyNotDriving => "ON_DUTY",
        }
    }
}

/// One block of the duty-status timeline. Invariant: `end > start`; a produced
/// sequence is contiguous and non-overlapping, covering the full elapsed trip
/// time with no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub status: DutyStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Location,
    pub remarks: String,
}

impl Interval {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }
}

/// Kinds of stops inserted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopKind {
    Break,
    Fuel,
    Rest,
    Pickup,
    Dropoff,
}

/// A stop marks the boundary between two intervals: the moment status changes
/// because of a forced rule trigger or a trip milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub kind: StopKind,
    pub time: DateTime<Utc>,
    pub location: Location,
    pub remarks: String,
}

/// Per-day accumulated minutes per duty status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyTotals {
    pub off_duty_minutes: i64,
    pub sleeper_minutes: i64,
    pub driving_minutes: i64,
    pub on_duty_minutes: i64,
}

impl DutyTotals {
    pub fn add(&mut self, status: DutyStatus, minutes: i64) {
        match status {
            DutyStatus::OffDuty => self.off_duty_minutes += minutes,
            DutyStatus::SleeperBerth => self.sleeper_minutes += minutes,
            DutyStatus::Driving => self.driving_minutes += minutes,
            DutyStatus::OnDutyNotDriving => self.on_duty_minutes += minutes,
        }
    }

    pub fn minutes_for(&self, status: DutyStatus) -> i64 {
        match status {
            DutyStatus::OffDuty => self.off_duty_minutes,
            DutyStatus::SleeperBerth => self.sleeper_minutes,
            DutyStatus::Driving => self.driving_minutes,
            DutyStatus::OnDutyNotDriving => self.on_duty_minutes,
        }
    }

    pub fn hours_for(&self, status: DutyStatus) -> f64 {
        self.minutes_for(status) as f64 / 60.0
    }

    pub fn total_minutes(&self) -> i64 {
        self.off_duty_minutes + self.sleeper_minutes + self.driving_minutes + self.on_duty_minutes
    }
}

/// One calendar-day logbook sheet in the trip's reference time zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub segments: Vec<Interval>,
    pub totals: DutyTotals,
}

/// A daily-log segment mapped onto the fixed visual grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSegment {
    pub start_index: usize,
    pub end_index: usize,
    pub row_index: usize,
    pub interval: Interval,
}

/// Output of one timeline computation. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub intervals: Vec<Interval>,
    pub stops: Vec<Stop>,
    pub total_minutes: i64,
}

impl Timeline {
    pub fn duration_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }
}

/// Trip-level summary handed to the serialization layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripMeta {
    pub total_days: usize,
    pub total_distance_miles: f64,
}
