//! Location resolution at the request boundary.
use eld_core::Location;
use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// The location shapes accepted at the request boundary: short or long
/// coordinate keys, or a free-text address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationQuery {
    Coords {
        lat: f64,
        lng: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    LongCoords {
        latitude: f64,
        longitude: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Address(String),
}

/// Seam for address resolution. A networked geocoding service implements
/// this trait; the pipeline itself never cares where coordinates come from.
pub trait Geocoder: Send + Sync {
    fn resolve(&self, query: &LocationQuery) -> Result<Location, RouteError>;
}

/// Resolves coordinate queries locally and rejects free-text addresses,
/// which need an external provider behind the same trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateGeocoder;

impl Geocoder for CoordinateGeocoder {
    fn resolve(&self, query: &LocationQuery) -> Result<Location, RouteError> {
        let location = match query {
            LocationQuery::Coords { lat, lng, name } => Location {
                latitude: *lat,
                longitude: *lng,
                name: name.clone(),
            },
            LocationQuery::LongCoords { latitude, longitude, name } => Location {
                latitude: *latitude,
                longitude: *longitude,
                name: name.clone(),
            },
            LocationQuery::Address(text) => {
                return Err(RouteError::Geocode(format!(
                    "address '{text}' requires an external geocoding provider"
                )));
            }
        };
        location
            .validate()
            .map_err(|e| RouteError::Geocode(e.to_string()))?;
        Ok(location)
    }
}
