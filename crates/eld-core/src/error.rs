//! Unified error model for the planning core.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EldError {
    /// Malformed caller input, rejected before any computation starts.
    #[error("INPUT/{0}")]
    InputValidation(String),

    /// The 70-hour cycle runs out before the route can be completed; the trip
    /// cannot be scheduled without a multi-day cycle reset.
    #[error("HOS/INFEASIBLE: {0}")]
    Infeasible(String),

    /// Misconfigured grid resolution. A programming error, never triggered by
    /// valid caller input.
    #[error("GRID/{0}")]
    InvalidGridConfig(String),
}
