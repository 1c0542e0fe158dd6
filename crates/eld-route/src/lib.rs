//! Route and location collaborators behind narrow trait seams.
//!
//! The planning core only needs an ordered distance/duration profile and
//! resolved coordinates. `RouteProvider` and `Geocoder` are the seams where a
//! networked directions/geocoding service plugs in; the offline
//! implementations here estimate routes from great-circle geometry so the
//! full pipeline runs without external calls.

pub mod error;
pub mod geo;
pub mod geocode;
pub mod polyline;
pub mod router;

pub use error::RouteError;
pub use geocode::{CoordinateGeocoder, Geocoder, LocationQuery};
pub use router::{HaversineRouter, RoutePlan, RouteProvider, RouterConfig};
