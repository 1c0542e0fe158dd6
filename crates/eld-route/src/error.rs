//! Errors raised by the route and location collaborators.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    /// A location query could not be resolved to coordinates.
    #[error("GEOCODE/{0}")]
    Geocode(String),

    /// Route estimation failed.
    #[error("ROUTE/{0}")]
    Routing(String),

    /// Malformed encoded polyline.
    #[error("POLYLINE/{0}")]
    Polyline(String),
}
