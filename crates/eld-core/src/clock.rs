//! Duty clock: the cumulative counters advanced as the engine consumes route
//! time. Owned exclusively by one timeline computation, never shared.
use crate::data_model::DutyStatus;
use crate::rules::{HosRules, Limit};

/// Named counters a rule reset can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    DrivingSinceBreak,
    DrivingToday,
    WindowToday,
    MilesSinceFuel,
}

/// Mutable accumulator for one timeline computation. All time counters are
/// whole minutes; fuel range is tracked in route miles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DutyClock {
    /// Driving minutes since the last qualifying break.
    pub driving_since_break: i64,
    /// Driving minutes since the last 10-hour reset.
    pub driving_today: i64,
    /// On-duty window minutes since the last 10-hour reset.
    pub window_today: i64,
    /// Minutes used in the rolling 8-day cycle, seeded from the caller.
    pub cycle_used: i64,
    /// Route miles since the last fuel stop.
    pub miles_since_fuel: f64,
}

impl DutyClock {
    pub fn with_cycle_used(cycle_minutes: i64) -> Self {
        Self { cycle_used: cycle_minutes, ..Self::default() }
    }

    /// Advance every counter relevant to `status` by `minutes` and report the
    /// limits now at or past threshold, in rule-table order.
    pub fn observe(&mut self, minutes: i64, status: DutyStatus, rules: &HosRules) -> Vec<Limit> {
        match status {
            DutyStatus::Driving => {
                self.driving_since_break += minutes;
                self.driving_today += minutes;
                self.window_today += minutes;
                self.cycle_used += minutes;
            }
            DutyStatus::OnDutyNotDriving => {
                self.window_today += minutes;
                self.cycle_used += minutes;
            }
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => {}
        }
        rules.violations(self)
    }

    pub fn record_miles(&mut self, miles: f64) {
        self.miles_since_fuel += miles;
    }

    pub fn reset(&mut self, counter: Counter) {
        match counter {
            Counter::DrivingSinceBreak => self.driving_since_break = 0,
            Counter::DrivingToday => self.driving_today = 0,
            Counter::WindowToday => self.window_today = 0,
            Counter::MilesSinceFuel => self.miles_since_fuel = 0.0,
        }
    }

    /// A 10-hour off-duty or sleeper-berth period: the daily counters start
    /// over, and the rest also satisfies the 30-minute break requirement.
    pub fn daily_reset(&mut self) {
        self.reset(Counter::DrivingToday);
        self.reset(Counter::WindowToday);
        self.reset(Counter::DrivingSinceBreak);
    }
}
