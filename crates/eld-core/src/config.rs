//! Per-computation engine configuration. Passed explicitly into each entry
//! point rather than read from ambient global state.
use serde::{Deserialize, Serialize};

use crate::rules::HosRules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub rules: HosRules,
    /// Fixed on-duty loading block at trip start.
    pub pickup_minutes: i64,
    /// Fixed on-duty unloading block at trip end.
    pub dropoff_minutes: i64,
    /// Duration of a qualifying 30-minute break.
    pub break_minutes: i64,
    /// Duration of a daily 10-hour reset.
    pub rest_minutes: i64,
    /// Duration of an inserted fuel stop.
    pub fuel_stop_minutes: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: HosRules::default(),
            pickup_minutes: 60,
            dropoff_minutes: 60,
            break_minutes: 30,
            rest_minutes: 600,
            fuel_stop_minutes: 30,
        }
    }
}
