//! Daily log slicer: partitions a timeline at local-midnight boundaries into
//! per-day logbook sheets. Splitting is lossless; no time is fabricated or
//! dropped.
use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::data_model::{DailyLog, DutyTotals, Interval};
use crate::error::EldError;

/// The trip's reference time zone, agreed at the API boundary as a fixed UTC
/// offset. It is never recomputed per location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlicerConfig {
    utc_offset_minutes: i32,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self { utc_offset_minutes: 0 }
    }
}

impl SlicerConfig {
    pub fn new(utc_offset_minutes: i32) -> Result<Self, EldError> {
        if utc_offset_minutes.abs() >= 24 * 60 {
            return Err(EldError::InputValidation(format!(
                "utc offset {utc_offset_minutes} minutes is not a valid time zone offset"
            )));
        }
        Ok(Self { utc_offset_minutes })
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    fn offset(&self) -> FixedOffset {
        // Range-checked at construction.
        FixedOffset::east_opt(self.utc_offset_minutes * 60).expect("validated offset")
    }
}

/// Partition `intervals` into calendar-day logs in the reference time zone.
/// An interval straddling local midnight is split in two; both halves inherit
/// its status, location, and remarks.
pub fn slice_timeline(intervals: &[Interval], config: &SlicerConfig) -> Vec<DailyLog> {
    let offset = config.offset();
    let mut days: BTreeMap<NaiveDate, DailyLog> = BTreeMap::new();

    for interval in intervals {
        let mut cursor = interval.start;
        while cursor < interval.end {
            let date = cursor.with_timezone(&offset).date_naive();
            let next_midnight =
                local_midnight_utc(date.succ_opt().expect("date within calendar range"), &offset);
            let end = interval.end.min(next_midnight);

            let log = days.entry(date).or_insert_with(|| DailyLog {
                date,
                segments: Vec::new(),
                totals: DutyTotals::default(),
            });
            log.totals.add(interval.status, (end - cursor).num_minutes());
            log.segments.push(Interval {
                status: interval.status,
                start: cursor,
                end,
                location: interval.location.clone(),
                remarks: interval.remarks.clone(),
            });
            cursor = end;
        }
    }

    days.into_values().collect()
}

/// The UTC instant at which `date` begins in the given fixed offset.
pub(crate) fn local_midnight_utc(date: NaiveDate, offset: &FixedOffset) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight exists on every date")
        .and_local_timezone(*offset)
        .single()
        .expect("fixed offsets map local times uniquely")
        .with_timezone(&Utc)
}
