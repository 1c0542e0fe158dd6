//! API handlers: trip planning and retrieval.
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use eld_core::{map_to_grid, slice_timeline, Location, TimelineEngine, TripMeta};

use crate::dto::{
    DailyLogDto, MetaDto, PlanTripRequest, RouteDto, StopDto, TripLogsResponse, TripResponse,
};
use crate::dto::round2;
use crate::error::ApiError;
use crate::metrics;
use crate::state::{AppState, StoredTrip};

/// POST /v1/trips/plan
///
/// Validate → resolve locations → route → HOS timeline → daily logs → grid.
pub async fn plan_trip(
    State(state): State<AppState>,
    Json(request): Json<PlanTripRequest>,
) -> Result<(StatusCode, Json<TripResponse>), ApiError> {
    let outcome = (|| {
        // The current location informs only where the trip begins; the logged
        // route runs pickup to dropoff.
        state.geocoder.resolve(&request.current_location)?;
        let pickup = state.geocoder.resolve(&request.pickup_location)?;
        let dropoff = state.geocoder.resolve(&request.dropoff_location)?;
        let start = request.start_time.unwrap_or_else(Utc::now);
        build_plan(&state, pickup, dropoff, request.current_cycle_used_hours, start)
    })();

    match outcome {
        Ok(response) => {
            state.metrics.trips_planned.inc();
            info!(trip_id = %response.trip_id, days = response.meta.total_days, "trip planned");
            state
                .store
                .insert(StoredTrip {
                    id: response.trip_id,
                    created_at: Utc::now(),
                    response: response.clone(),
                })
                .await;
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            state.metrics.trips_rejected.inc();
            Err(err)
        }
    }
}

/// The synchronous planning pipeline behind the endpoint.
pub fn build_plan(
    state: &AppState,
    pickup: Location,
    dropoff: Location,
    current_cycle_used_hours: f64,
    start: DateTime<Utc>,
) -> Result<TripResponse, ApiError> {
    let config = &state.config;

    let route = state.router.route(&pickup, &dropoff)?;
    let engine = TimelineEngine::new(config.engine.clone());
    let timeline = engine.build(&route.legs, start, current_cycle_used_hours, pickup, dropoff)?;

    let logs = slice_timeline(&timeline.intervals, &config.slicer);
    let mut log_dtos = Vec::with_capacity(logs.len());
    for log in &logs {
        let grid = map_to_grid(log, &config.grid)?;
        log_dtos.push(DailyLogDto::from_parts(log, &grid));
    }

    let meta = TripMeta {
        total_days: log_dtos.len(),
        total_distance_miles: route.distance_miles,
    };

    Ok(TripResponse {
        trip_id: Uuid::new_v4(),
        route: RouteDto::from_plan(&route),
        stops: StopDto::from_stops(&timeline),
        meta: MetaDto {
            total_days: meta.total_days,
            total_distance_miles: round2(meta.total_distance_miles),
        },
        logs: log_dtos,
    })
}

/// GET /v1/trips/{id}
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResponse>, ApiError> {
    state
        .store
        .get(&id)
        .await
        .map(|trip| Json(trip.response))
        .ok_or_else(|| ApiError::NotFound(format!("trip {id} not found")))
}

/// GET /v1/trips/{id}/logs
pub async fn get_trip_logs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripLogsResponse>, ApiError> {
    state
        .store
        .get(&id)
        .await
        .map(|trip| {
            Json(TripLogsResponse {
                trip_id: trip.id,
                logs: trip.response.logs,
                meta: trip.response.meta,
            })
        })
        .ok_or_else(|| ApiError::NotFound(format!("trip {id} not found")))
}

/// GET /v1/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "eld-planner",
        "version": eld_core::ELD_VERSION,
    }))
}

/// GET /v1/metrics
pub async fn prometheus_metrics(State(state): State<AppState>) -> Result<String, ApiError> {
    metrics::encode(&state.metrics.registry).map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use eld_core::{DutyStatus, StopKind};

    fn nyc() -> Location {
        Location::named(40.7128, -74.0060, "New York, NY")
    }

    fn la() -> Location {
        Location::named(34.0522, -118.2437, "Los Angeles, CA")
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 14, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_build_plan_produces_complete_response() {
        let state = AppState::default();
        let response = build_plan(&state, nyc(), la(), 0.0, start()).unwrap();

        assert!(response.meta.total_days >= 3);
        assert_eq!(response.meta.total_days, response.logs.len());
        assert!(response.route.distance_miles > 2800.0);
        assert!(!response.route.polyline.is_empty());

        // Stops bracket the trip and include the rule-driven insertions.
        assert_eq!(response.stops.first().unwrap().kind, StopKind::Pickup);
        assert_eq!(response.stops.last().unwrap().kind, StopKind::Dropoff);
        assert!(response.stops.iter().any(|s| s.kind == StopKind::Rest));
        assert!(response.stops.iter().any(|s| s.kind == StopKind::Fuel));

        // Every segment carries grid indices inside the 96-column day.
        for log in &response.logs {
            for segment in &log.segments {
                assert!(segment.end_index <= 96);
                assert!(segment.start_index <= segment.end_index);
            }
        }
    }

    #[test]
    fn test_build_plan_daily_totals_are_rounded_hours() {
        let state = AppState::default();
        let response = build_plan(&state, nyc(), la(), 0.0, start()).unwrap();
        for log in &response.logs {
            let day_total = log.totals.off_duty_hours
                + log.totals.sleeper_hours
                + log.totals.driving_hours
                + log.totals.on_duty_hours;
            // Each total is rounded to two decimals, so allow that much slack.
            assert!(day_total <= 24.03);
            // Two-decimal rounding leaves no extra precision behind.
            assert_eq!(round2(log.totals.driving_hours), log.totals.driving_hours);
        }
    }

    #[test]
    fn test_build_plan_rejects_spent_cycle() {
        let state = AppState::default();
        let err = build_plan(&state, nyc(), la(), 69.5, start()).unwrap_err();
        assert!(matches!(err, ApiError::Unprocessable(_)));
    }

    #[test]
    fn test_build_plan_rejects_negative_hours() {
        let state = AppState::default();
        let err = build_plan(&state, nyc(), la(), -2.0, start()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_planned_trip_is_retrievable() {
        let state = AppState::default();
        let response = build_plan(&state, nyc(), la(), 0.0, start()).unwrap();
        state
            .store
            .insert(StoredTrip {
                id: response.trip_id,
                created_at: Utc::now(),
                response: response.clone(),
            })
            .await;

        let fetched = get_trip(State(state.clone()), Path(response.trip_id))
            .await
            .unwrap();
        assert_eq!(fetched.0, response);

        let missing = get_trip(State(state), Path(Uuid::new_v4())).await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_statuses_present_in_cross_country_logs() {
        let state = AppState::default();
        let response = build_plan(&state, nyc(), la(), 0.0, start()).unwrap();
        let statuses: Vec<DutyStatus> = response
            .logs
            .iter()
            .flat_map(|l| l.segments.iter().map(|s| s.status))
            .collect();
        assert!(statuses.contains(&DutyStatus::Driving));
        assert!(statuses.contains(&DutyStatus::SleeperBerth));
        assert!(statuses.contains(&DutyStatus::OnDutyNotDriving));
    }
}
