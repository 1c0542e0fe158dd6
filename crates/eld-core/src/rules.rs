//! HOS rule set: the fixed FMCSA property-carrying limits, held as a data
//! table with a single generic evaluator.
use serde::{Deserialize, Serialize};

use crate::clock::DutyClock;

/// Named limits, declared in tie-break order: when several thresholds are
/// reached at the same instant, the earliest variant's action applies first
/// and the rest are re-evaluated against the post-action clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    /// 11 hours of driving since the last 10-hour reset.
    DrivingLimit,
    /// 14-hour on-duty window since the last 10-hour reset.
    DutyWindow,
    /// 30-minute break required after 8 cumulative driving hours.
    BreakRequired,
    /// 70-hour rolling 8-day cycle.
    CycleLimit,
    /// Fuel stop required by cumulative route miles.
    FuelRange,
}

/// Evaluation order for the whole table.
pub const LIMIT_TABLE: [Limit; 5] = [
    Limit::DrivingLimit,
    Limit::DutyWindow,
    Limit::BreakRequired,
    Limit::CycleLimit,
    Limit::FuelRange,
];

/// Thresholds for each limit. Defaults are the FMCSA property-carrying values;
/// callers pass their own copy per computation, so concurrent computations
/// with different settings never interfere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HosRules {
    pub max_driving_minutes: i64,
    pub max_window_minutes: i64,
    pub break_after_driving_minutes: i64,
    pub max_cycle_minutes: i64,
    pub fuel_interval_miles: f64,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_driving_minutes: 660,
            max_window_minutes: 840,
            break_after_driving_minutes: 480,
            max_cycle_minutes: 4200,
            fuel_interval_miles: 1000.0,
        }
    }
}

impl HosRules {
    /// Head room before `limit` triggers: minutes for the time-based limits,
    /// miles for the fuel range. Zero or negative means the limit is due.
    pub fn headroom(&self, clock: &DutyClock, limit: Limit) -> f64 {
        match limit {
            Limit::DrivingLimit => (self.max_driving_minutes - clock.driving_today) as f64,
            Limit::DutyWindow => (self.max_window_minutes - clock.window_today) as f64,
            Limit::BreakRequired => {
                (self.break_after_driving_minutes - clock.driving_since_break) as f64
            }
            Limit::CycleLimit => (self.max_cycle_minutes - clock.cycle_used) as f64,
            Limit::FuelRange => self.fuel_interval_miles - clock.miles_since_fuel,
        }
    }

    /// Limits at or past threshold, in table order.
    pub fn violations(&self, clock: &DutyClock) -> Vec<Limit> {
        LIMIT_TABLE
            .iter()
            .copied()
            .filter(|limit| self.headroom(clock, *limit) <= 0.0)
            .collect()
    }

    /// Minutes of driving possible before the nearest time-based limit, and
    /// which limit that is. Ties resolve to the earlier table entry. Fuel
    /// range is distance-based and handled by the engine's own lookahead.
    pub fn drivable_minutes(&self, clock: &DutyClock) -> (i64, Limit) {
        let mut nearest = (i64::MAX, Limit::DrivingLimit);
        for limit in [
            Limit::DrivingLimit,
            Limit::DutyWindow,
            Limit::BreakRequired,
            Limit::CycleLimit,
        ] {
            let minutes = self.headroom(clock, limit) as i64;
            if minutes < nearest.0 {
                nearest = (minutes, limit);
            }
        }
        nearest
    }
}
