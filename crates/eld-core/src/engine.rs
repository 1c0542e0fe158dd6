//! Timeline engine: folds a route's distance/duration profile and a starting
//! duty clock into an HOS-compliant sequence of duty-status intervals.
//!
//! The engine never mutates and rolls back: before each driving stretch it
//! asks the rule set for the drivable head room (a pure lookahead), drives
//! exactly to the nearest boundary, and inserts whatever the triggered rule
//! demands before continuing. Every timestamp is `start + elapsed`; no wall
//! clock is consulted mid-computation.
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::clock::{Counter, DutyClock};
use crate::config::EngineConfig;
use crate::data_model::{DutyStatus, Interval, Location, RouteLeg, Stop, StopKind, Timeline};
use crate::error::EldError;
use crate::rules::Limit;

pub struct TimelineEngine {
    config: EngineConfig,
}

impl TimelineEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Build the duty-status timeline for a route, starting at `start` with
    /// `current_cycle_used_hours` already spent in the 70-hour cycle.
    ///
    /// Fails with `Infeasible` when the cycle runs out while route distance
    /// remains, and with `InputValidation` for malformed legs or hours.
    pub fn build(
        &self,
        legs: &[RouteLeg],
        start: DateTime<Utc>,
        current_cycle_used_hours: f64,
        pickup: Location,
        dropoff: Location,
    ) -> Result<Timeline, EldError> {
        let rules = &self.config.rules;

        if !current_cycle_used_hours.is_finite() || current_cycle_used_hours < 0.0 {
            return Err(EldError::InputValidation(format!(
                "current_cycle_used_hours must be non-negative, got {current_cycle_used_hours}"
            )));
        }
        let cycle_minutes = (current_cycle_used_hours * 60.0).round() as i64;
        if cycle_minutes >= rules.max_cycle_minutes {
            return Err(EldError::Infeasible(format!(
                "{current_cycle_used_hours} cycle hours already used of the {} available",
                rules.max_cycle_minutes / 60
            )));
        }
        pickup.validate()?;
        dropoff.validate()?;
        for leg in legs {
            leg.start.validate()?;
            leg.end.validate()?;
            if !leg.distance_miles.is_finite() || leg.distance_miles < 0.0 {
                return Err(EldError::InputValidation(format!(
                    "leg distance must be non-negative, got {}",
                    leg.distance_miles
                )));
            }
            if !leg.duration_hours.is_finite() || leg.duration_hours < 0.0 {
                return Err(EldError::InputValidation(format!(
                    "leg duration must be non-negative, got {}",
                    leg.duration_hours
                )));
            }
        }

        let mut clock = DutyClock::with_cycle_used(cycle_minutes);
        let mut cursor = start;
        let mut intervals: Vec<Interval> = Vec::new();
        let mut stops: Vec<Stop> = Vec::new();

        // Fixed on-duty loading block before any driving.
        stops.push(Stop {
            kind: StopKind::Pickup,
            time: cursor,
            location: pickup.clone(),
            remarks: "Pickup - loading".to_string(),
        });
        append(
            &mut intervals,
            &mut cursor,
            DutyStatus::OnDutyNotDriving,
            self.config.pickup_minutes,
            pickup.clone(),
            "Pickup - on duty, not driving (loading)".to_string(),
        );
        clock.observe(self.config.pickup_minutes, DutyStatus::OnDutyNotDriving, rules);

        for leg in legs {
            let leg_minutes = minutes_of(leg.duration_hours);
            if leg_minutes == 0 || leg.distance_miles <= 0.0 {
                continue;
            }
            let miles_per_minute = leg.distance_miles / leg_minutes as f64;
            let mut remaining = leg_minutes;

            while remaining > 0 {
                let driven = leg_minutes - remaining;
                let here = leg.start.lerp(&leg.end, driven as f64 / leg_minutes as f64);

                // Required actions first, most restrictive rule first; the
                // clock is re-evaluated after each inserted action.
                let due = rules
                    .violations(&clock)
                    .into_iter()
                    .find(|limit| *limit != Limit::FuelRange);
                match due {
                    Some(limit @ (Limit::DrivingLimit | Limit::DutyWindow)) => {
                        let reason = match limit {
                            Limit::DrivingLimit => "11-hour driving limit reached",
                            _ => "14-hour duty window reached",
                        };
                        debug!(?limit, elapsed_min = (cursor - start).num_minutes(), "inserting 10-hour rest");
                        stops.push(Stop {
                            kind: StopKind::Rest,
                            time: cursor,
                            location: named(&here, "Rest Area"),
                            remarks: reason.to_string(),
                        });
                        append(
                            &mut intervals,
                            &mut cursor,
                            DutyStatus::SleeperBerth,
                            self.config.rest_minutes,
                            named(&here, "Rest Area"),
                            format!("10-hour rest - {reason}"),
                        );
                        clock.daily_reset();
                        continue;
                    }
                    Some(Limit::BreakRequired) => {
                        debug!(elapsed_min = (cursor - start).num_minutes(), "inserting 30-minute break");
                        stops.push(Stop {
                            kind: StopKind::Break,
                            time: cursor,
                            location: named(&here, "Rest Stop"),
                            remarks: "30-minute break after 8 hours of driving".to_string(),
                        });
                        append(
                            &mut intervals,
                            &mut cursor,
                            DutyStatus::OffDuty,
                            self.config.break_minutes,
                            named(&here, "Rest Stop"),
                            "30-minute break after 8 hours of driving".to_string(),
                        );
                        clock.reset(Counter::DrivingSinceBreak);
                        continue;
                    }
                    Some(Limit::CycleLimit) => {
                        return Err(EldError::Infeasible(format!(
                            "70-hour cycle exhausted with {:.0} route miles remaining",
                            remaining as f64 * miles_per_minute + miles_after(leg, legs)
                        )));
                    }
                    Some(Limit::FuelRange) | None => {}
                }

                let (head_room, binding) = rules.drivable_minutes(&clock);
                if binding == Limit::CycleLimit && head_room < remaining {
                    return Err(EldError::Infeasible(format!(
                        "70-hour cycle allows only {head_room} more driving minutes, {remaining} needed on the current leg"
                    )));
                }
                let stretch = head_room.min(remaining);
                let stretch_miles = stretch as f64 * miles_per_minute;

                // Fuel is checked against miles, never split mid-stretch: stop
                // at this boundary if the coming stretch would outrun the tank.
                if clock.miles_since_fuel > 0.0
                    && clock.miles_since_fuel + stretch_miles > rules.fuel_interval_miles
                {
                    debug!(miles = clock.miles_since_fuel, "inserting fuel stop");
                    let remarks = format!(
                        "Fuel stop - {:.0} miles since last fueling",
                        clock.miles_since_fuel
                    );
                    stops.push(Stop {
                        kind: StopKind::Fuel,
                        time: cursor,
                        location: named(&here, "Fuel Stop"),
                        remarks: remarks.clone(),
                    });
                    append(
                        &mut intervals,
                        &mut cursor,
                        DutyStatus::OnDutyNotDriving,
                        self.config.fuel_stop_minutes,
                        named(&here, "Fuel Stop"),
                        remarks,
                    );
                    clock.observe(self.config.fuel_stop_minutes, DutyStatus::OnDutyNotDriving, rules);
                    clock.reset(Counter::MilesSinceFuel);
                    continue;
                }

                append(
                    &mut intervals,
                    &mut cursor,
                    DutyStatus::Driving,
                    stretch,
                    here,
                    format!("Route segment - {stretch_miles:.1} miles"),
                );
                clock.observe(stretch, DutyStatus::Driving, rules);
                clock.record_miles(stretch_miles);
                remaining -= stretch;
            }
        }

        // Fixed on-duty unloading block; the route distance is fully consumed,
        // so cycle exhaustion here no longer fails the trip.
        stops.push(Stop {
            kind: StopKind::Dropoff,
            time: cursor,
            location: dropoff.clone(),
            remarks: "Dropoff - unloading".to_string(),
        });
        append(
            &mut intervals,
            &mut cursor,
            DutyStatus::OnDutyNotDriving,
            self.config.dropoff_minutes,
            dropoff,
            "Dropoff - on duty, not driving (unloading)".to_string(),
        );
        clock.observe(self.config.dropoff_minutes, DutyStatus::OnDutyNotDriving, rules);

        Ok(Timeline {
            intervals,
            stops,
            total_minutes: (cursor - start).num_minutes(),
        })
    }
}

fn minutes_of(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

fn named(location: &Location, name: &str) -> Location {
    Location {
        name: Some(name.to_string()),
        ..location.clone()
    }
}

/// Distance left in legs after the current one; only used for error messages.
fn miles_after(current: &RouteLeg, legs: &[RouteLeg]) -> f64 {
    let mut seen = false;
    let mut miles = 0.0;
    for leg in legs {
        if seen {
            miles += leg.distance_miles;
        }
        if std::ptr::eq(leg, current) {
            seen = true;
        }
    }
    miles
}

fn append(
    intervals: &mut Vec<Interval>,
    cursor: &mut DateTime<Utc>,
    status: DutyStatus,
    minutes: i64,
    location: Location,
    remarks: String,
) {
    let end = *cursor + Duration::minutes(minutes);
    intervals.push(Interval {
        status,
        start: *cursor,
        end,
        location,
        remarks,
    });
    *cursor = end;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 14, 6, 0, 0).unwrap()
    }

    fn leg(miles: f64, hours: f64) -> RouteLeg {
        RouteLeg {
            start: Location::named(40.7128, -74.0060, "New York, NY"),
            end: Location::named(41.8781, -87.6298, "Chicago, IL"),
            distance_miles: miles,
            duration_hours: hours,
        }
    }

    fn build(legs: &[RouteLeg], cycle_hours: f64) -> Result<Timeline, EldError> {
        let engine = TimelineEngine::new(EngineConfig::default());
        engine.build(
            legs,
            start(),
            cycle_hours,
            Location::named(40.7128, -74.0060, "New York, NY"),
            Location::named(41.8781, -87.6298, "Chicago, IL"),
        )
    }

    fn statuses(timeline: &Timeline) -> Vec<DutyStatus> {
        timeline.intervals.iter().map(|i| i.status).collect()
    }

    #[test]
    fn test_short_trip_is_pickup_drive_dropoff() {
        let timeline = build(&[leg(100.0, 2.0)], 0.0).unwrap();
        assert_eq!(
            statuses(&timeline),
            vec![
                DutyStatus::OnDutyNotDriving,
                DutyStatus::Driving,
                DutyStatus::OnDutyNotDriving,
            ]
        );
        assert_eq!(timeline.total_minutes, 60 + 120 + 60);
    }

    #[test]
    fn test_break_inserted_after_eight_driving_hours() {
        let timeline = build(&[leg(500.0, 9.0)], 0.0).unwrap();
        let breaks: Vec<_> = timeline
            .stops
            .iter()
            .filter(|s| s.kind == StopKind::Break)
            .collect();
        assert_eq!(breaks.len(), 1);
        // The break lands exactly at the 8-hour driving boundary: 1h pickup
        // plus 8h driving after the 06:00 start.
        assert_eq!(
            breaks[0].time,
            Utc.with_ymd_and_hms(2025, 10, 14, 15, 0, 0).unwrap()
        );
        // The driving leg is split around the break.
        let driving: Vec<_> = timeline
            .intervals
            .iter()
            .filter(|i| i.status == DutyStatus::Driving)
            .collect();
        assert_eq!(driving.len(), 2);
        assert_eq!(driving[0].duration_minutes(), 480);
        assert_eq!(driving[1].duration_minutes(), 60);
    }

    #[test]
    fn test_rest_inserted_at_driving_limit() {
        let timeline = build(&[leg(700.0, 12.0)], 0.0).unwrap();
        let rests: Vec<_> = timeline
            .intervals
            .iter()
            .filter(|i| i.status == DutyStatus::SleeperBerth)
            .collect();
        assert_eq!(rests.len(), 1);
        assert_eq!(rests[0].duration_minutes(), 600);
        // Total driving stays within 11 hours before the reset.
        let driving_before_rest: i64 = timeline
            .intervals
            .iter()
            .take_while(|i| i.status != DutyStatus::SleeperBerth)
            .filter(|i| i.status == DutyStatus::Driving)
            .map(Interval::duration_minutes)
            .sum();
        assert_eq!(driving_before_rest, 660);
    }

    #[test]
    fn test_duty_window_forces_rest_without_driving_limit() {
        // A 4-hour loading block burns window time without driving time, so
        // the 14-hour window closes before the 11-hour driving limit does.
        let config = EngineConfig {
            pickup_minutes: 240,
            ..EngineConfig::default()
        };
        let engine = TimelineEngine::new(config);
        let timeline = engine
            .build(
                &[leg(400.0, 11.0)],
                start(),
                0.0,
                Location::named(40.7128, -74.0060, "New York, NY"),
                Location::named(41.8781, -87.6298, "Chicago, IL"),
            )
            .unwrap();
        let rest_stops: Vec<_> = timeline
            .stops
            .iter()
            .filter(|s| s.kind == StopKind::Rest)
            .collect();
        assert!(!rest_stops.is_empty());
        assert!(rest_stops[0].remarks.contains("14-hour"));
    }

    #[test]
    fn test_fuel_stop_before_tank_runs_dry() {
        let legs: Vec<RouteLeg> = (0..6).map(|_| leg(200.0, 3.5)).collect();
        let timeline = build(&legs, 0.0).unwrap();
        let fuel: Vec<_> = timeline
            .stops
            .iter()
            .filter(|s| s.kind == StopKind::Fuel)
            .collect();
        assert_eq!(fuel.len(), 1);
        // Consecutive fuel stops stay within the 1000-mile range.
        assert!(fuel[0].remarks.contains("1000") || fuel[0].remarks.contains("800"));
    }

    #[test]
    fn test_pickup_and_dropoff_bracket_the_trip() {
        let timeline = build(&[leg(100.0, 2.0)], 0.0).unwrap();
        assert_eq!(timeline.stops.first().unwrap().kind, StopKind::Pickup);
        assert_eq!(timeline.stops.last().unwrap().kind, StopKind::Dropoff);
        assert_eq!(timeline.intervals.first().unwrap().start, start());
    }

    #[test]
    fn test_intervals_are_contiguous_and_account_for_all_time() {
        let timeline = build(&[leg(700.0, 12.0), leg(500.0, 9.0)], 0.0).unwrap();
        for pair in timeline.intervals.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let total: i64 = timeline.intervals.iter().map(Interval::duration_minutes).sum();
        assert_eq!(total, timeline.total_minutes);
    }

    #[test]
    fn test_cycle_nearly_spent_is_infeasible() {
        let err = build(&[leg(100.0, 2.0)], 69.5).unwrap_err();
        assert!(matches!(err, EldError::Infeasible(_)));
    }

    #[test]
    fn test_cycle_fully_spent_rejected_up_front() {
        let err = build(&[leg(100.0, 2.0)], 70.0).unwrap_err();
        assert!(matches!(err, EldError::Infeasible(_)));
    }

    #[test]
    fn test_negative_cycle_hours_rejected() {
        let err = build(&[leg(100.0, 2.0)], -1.0).unwrap_err();
        assert!(matches!(err, EldError::InputValidation(_)));
    }

    #[test]
    fn test_cycle_exhaustion_mid_route_is_infeasible() {
        // 60 cycle hours left only allows ~59 on-duty hours; a 70-hour
        // driving route cannot finish.
        let legs: Vec<RouteLeg> = (0..10).map(|_| leg(350.0, 7.0)).collect();
        let err = build(&legs, 10.0).unwrap_err();
        assert!(matches!(err, EldError::Infeasible(_)));
    }

    #[test]
    fn test_degenerate_legs_are_skipped() {
        let timeline = build(&[leg(0.0, 0.0), leg(100.0, 2.0)], 0.0).unwrap();
        assert_eq!(timeline.total_minutes, 60 + 120 + 60);
    }

    #[test]
    fn test_negative_leg_duration_rejected() {
        let err = build(&[leg(100.0, -2.0)], 0.0).unwrap_err();
        assert!(matches!(err, EldError::InputValidation(_)));
    }

    #[test]
    fn test_deterministic_given_identical_inputs() {
        let legs = vec![leg(700.0, 12.0), leg(500.0, 9.0)];
        let a = build(&legs, 3.0).unwrap();
        let b = build(&legs, 3.0).unwrap();
        assert_eq!(a, b);
    }
}
