//! Wire types for the /v1 endpoints: camelCase JSON, ISO-8601 UTC
//! timestamps, hours rounded to two decimals.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eld_core::{DailyLog, DutyStatus, GridSegment, Stop, StopKind, Timeline};
use eld_route::{LocationQuery, RoutePlan};

#[derive(Debug, Clone, Deserialize)]
pub struct PlanTripRequest {
    pub current_location: LocationQuery,
    pub pickup_location: LocationQuery,
    pub dropoff_location: LocationQuery,
    pub current_cycle_used_hours: f64,
    /// Optional trip start; defaults to the time the request is served, which
    /// is the only wall-clock read in the whole pipeline.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub trip_id: Uuid,
    pub route: RouteDto,
    pub logs: Vec<DailyLogDto>,
    pub stops: Vec<StopDto>,
    pub meta: MetaDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub polyline: String,
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub legs: Vec<LegDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub distance_miles: f64,
    pub duration_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogDto {
    pub date: NaiveDate,
    pub segments: Vec<SegmentDto>,
    pub totals: TotalsDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDto {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub start_index: usize,
    pub end_index: usize,
    pub row_index: usize,
    pub status: DutyStatus,
    pub location: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDto {
    pub off_duty_hours: f64,
    pub sleeper_hours: f64,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    #[serde(rename = "type")]
    pub kind: StopKind,
    pub time: DateTime<Utc>,
    pub location: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDto {
    pub total_days: usize,
    pub total_distance_miles: f64,
}

/// Logs-only view served by `GET /v1/trips/{id}/logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLogsResponse {
    pub trip_id: Uuid,
    pub logs: Vec<DailyLogDto>,
    pub meta: MetaDto,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl RouteDto {
    pub fn from_plan(plan: &RoutePlan) -> Self {
        Self {
            polyline: plan.polyline.clone(),
            distance_miles: round2(plan.distance_miles),
            duration_hours: round2(plan.duration_hours),
            legs: plan
                .legs
                .iter()
                .map(|leg| LegDto {
                    distance_miles: round2(leg.distance_miles),
                    duration_hours: round2(leg.duration_hours),
                })
                .collect(),
        }
    }
}

impl DailyLogDto {
    /// Combine a sliced day with its grid mapping. The mapper emits one grid
    /// segment per sliced segment, in order.
    pub fn from_parts(log: &DailyLog, grid: &[GridSegment]) -> Self {
        Self {
            date: log.date,
            segments: grid
                .iter()
                .map(|segment| SegmentDto {
                    start_time: segment.interval.start,
                    end_time: segment.interval.end,
                    start_index: segment.start_index,
                    end_index: segment.end_index,
                    row_index: segment.row_index,
                    status: segment.interval.status,
                    location: segment.interval.location.label(),
                    remarks: segment.interval.remarks.clone(),
                })
                .collect(),
            totals: TotalsDto {
                off_duty_hours: round2(log.totals.hours_for(DutyStatus::OffDuty)),
                sleeper_hours: round2(log.totals.hours_for(DutyStatus::SleeperBerth)),
                driving_hours: round2(log.totals.hours_for(DutyStatus::Driving)),
                on_duty_hours: round2(log.totals.hours_for(DutyStatus::OnDutyNotDriving)),
            },
        }
    }
}

impl StopDto {
    pub fn from_stops(timeline: &Timeline) -> Vec<Self> {
        timeline.stops.iter().map(StopDto::from_stop).collect()
    }

    fn from_stop(stop: &Stop) -> Self {
        Self {
            kind: stop.kind,
            time: stop.time,
            location: stop.location.label(),
            remarks: stop.remarks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_all_location_shapes() {
        let body = r#"{
            "current_location": {"lat": 40.7128, "lng": -74.0060},
            "pickup_location": {"latitude": 40.7580, "longitude": -73.9855},
            "dropoff_location": "Los Angeles, CA",
            "current_cycle_used_hours": 12.5
        }"#;
        let request: PlanTripRequest = serde_json::from_str(body).unwrap();
        assert!(matches!(request.current_location, LocationQuery::Coords { .. }));
        assert!(matches!(request.pickup_location, LocationQuery::LongCoords { .. }));
        assert!(matches!(request.dropoff_location, LocationQuery::Address(_)));
        assert_eq!(request.current_cycle_used_hours, 12.5);
        assert!(request.start_time.is_none());
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(round2(27.456789), 27.46);
        assert_eq!(round2(2.0), 2.0);
        // 9.875 is exact in binary, so the half rounds away from zero.
        assert_eq!(round2(9.875), 9.88);
    }

    #[test]
    fn test_response_uses_camel_case_and_type_key() {
        let stop = StopDto {
            kind: StopKind::Fuel,
            time: DateTime::parse_from_rfc3339("2025-10-14T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            location: "Fuel Stop".to_string(),
            remarks: "Fuel stop".to_string(),
        };
        let json = serde_json::to_value(&stop).unwrap();
        assert_eq!(json["type"], "FUEL");
        assert!(json.get("time").is_some());

        let meta = MetaDto { total_days: 3, total_distance_miles: 1430.2 };
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("totalDays").is_some());
        assert!(json.get("totalDistanceMiles").is_some());
    }
}
