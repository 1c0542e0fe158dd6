//! Grid mapper: converts each daily-log segment's timestamps into column
//! indices on the fixed-resolution logbook grid, one row per duty status.
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::data_model::{DailyLog, DutyStatus, GridSegment};
use crate::error::EldError;
use crate::slicer::local_midnight_utc;

pub const MINUTES_PER_DAY: i64 = 1440;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Columns per 24-hour day; must divide 1440 evenly. 96 gives the
    /// standard 15-minute logbook resolution.
    pub columns_per_day: i64,
    /// Row assignment per duty status, top to bottom.
    pub row_order: [DutyStatus; 4],
    /// Must match the slicer's reference offset.
    pub utc_offset_minutes: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns_per_day: 96,
            row_order: [
                DutyStatus::OffDuty,
                DutyStatus::SleeperBerth,
                DutyStatus::Driving,
                DutyStatus::OnDutyNotDriving,
            ],
            utc_offset_minutes: 0,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), EldError> {
        if self.columns_per_day <= 0 || MINUTES_PER_DAY % self.columns_per_day != 0 {
            return Err(EldError::InvalidGridConfig(format!(
                "{} columns do not divide a 1440-minute day evenly",
                self.columns_per_day
            )));
        }
        for (i, status) in self.row_order.iter().enumerate() {
            if self.row_order[..i].contains(status) {
                return Err(EldError::InvalidGridConfig(format!(
                    "duty status {} appears twice in the row order",
                    status.label()
                )));
            }
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(EldError::InvalidGridConfig(format!(
                "utc offset {} minutes is not a valid time zone offset",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    fn row_index(&self, status: DutyStatus) -> usize {
        self.row_order
            .iter()
            .position(|s| *s == status)
            .expect("validated row order covers every status")
    }
}

/// Map one day's segments onto the grid. Pure: repeated calls with the same
/// log and configuration yield identical segments.
pub fn map_to_grid(log: &DailyLog, config: &GridConfig) -> Result<Vec<GridSegment>, EldError> {
    config.validate()?;
    let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60).expect("validated offset");
    let day_start = local_midnight_utc(log.date, &offset);
    let slot_minutes = MINUTES_PER_DAY / config.columns_per_day;

    let mut segments = Vec::with_capacity(log.segments.len());
    for interval in &log.segments {
        let s = (interval.start - day_start)
            .num_minutes()
            .clamp(0, MINUTES_PER_DAY);
        let e = (interval.end - day_start)
            .num_minutes()
            .clamp(0, MINUTES_PER_DAY);
        segments.push(GridSegment {
            start_index: (s / slot_minutes) as usize,
            end_index: ((e + slot_minutes - 1) / slot_minutes) as usize,
            row_index: config.row_index(interval.status),
            interval: interval.clone(),
        });
    }
    Ok(segments)
}
