//! ELD Core: duty clock, HOS rule set, timeline engine, log slicer, grid mapper
//!
//! Pure synchronous planning core. One `TimelineEngine::build` call is a
//! deterministic fold over a route's distance/duration profile; daily logs and
//! grid segments are derived views computed once from its output.

pub mod clock;
pub mod config;
pub mod data_model;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rules;
pub mod slicer;

pub use clock::{Counter, DutyClock};
pub use config::EngineConfig;
pub use data_model::{
    DailyLog, DutyStatus, DutyTotals, GridSegment, Interval, Location, RouteLeg, Stop, StopKind,
    Timeline, TripMeta,
};
pub use engine::TimelineEngine;
pub use error::EldError;
pub use grid::{map_to_grid, GridConfig};
pub use rules::{HosRules, Limit};
pub use slicer::{slice_timeline, SlicerConfig};

/// Version of the planning engine, reported by the API health endpoint.
pub const ELD_VERSION: &str = "0.1.0";
