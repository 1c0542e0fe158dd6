//! Offline route estimation.
//!
//! `RouteProvider` is the seam a networked directions service implements.
//! `HaversineRouter` approximates it: great-circle distance uplifted by a
//! road circuity factor, a flat average speed, and the route chopped into
//! bounded legs so the planning core sees a usable distance profile.
use eld_core::{Location, RouteLeg};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RouteError;
use crate::geo::haversine_miles;
use crate::polyline;

/// A computed route: geometry plus the ordered distance/duration profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub polyline: String,
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub average_speed_mph: f64,
    /// Uplift from great-circle to road distance.
    pub road_circuity_factor: f64,
    /// Upper bound on a single leg; bounded legs keep fuel checks at leg
    /// granularity.
    pub max_leg_miles: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            average_speed_mph: 55.0,
            road_circuity_factor: 1.18,
            max_leg_miles: 200.0,
        }
    }
}

pub trait RouteProvider: Send + Sync {
    fn route(&self, origin: &Location, destination: &Location) -> Result<RoutePlan, RouteError>;
}

#[derive(Debug, Clone, Default)]
pub struct HaversineRouter {
    config: RouterConfig,
}

impl HaversineRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }
}

impl RouteProvider for HaversineRouter {
    fn route(&self, origin: &Location, destination: &Location) -> Result<RoutePlan, RouteError> {
        origin
            .validate()
            .and_then(|()| destination.validate())
            .map_err(|e| RouteError::Routing(e.to_string()))?;
        if self.config.average_speed_mph <= 0.0 || self.config.max_leg_miles <= 0.0 {
            return Err(RouteError::Routing(
                "router speed and leg bound must be positive".to_string(),
            ));
        }

        let distance_miles = haversine_miles(origin, destination) * self.config.road_circuity_factor;
        let duration_hours = distance_miles / self.config.average_speed_mph;

        if distance_miles < 1e-6 {
            let point = [(origin.latitude, origin.longitude)];
            return Ok(RoutePlan {
                polyline: polyline::encode(&point),
                distance_miles: 0.0,
                duration_hours: 0.0,
                legs: Vec::new(),
            });
        }

        let leg_count = (distance_miles / self.config.max_leg_miles).ceil().max(1.0) as usize;
        let leg_miles = distance_miles / leg_count as f64;
        let leg_hours = duration_hours / leg_count as f64;

        let mut points = Vec::with_capacity(leg_count + 1);
        points.push(origin.clone());
        for i in 1..leg_count {
            points.push(origin.lerp(destination, i as f64 / leg_count as f64));
        }
        points.push(destination.clone());

        let legs = points
            .windows(2)
            .map(|pair| RouteLeg {
                start: pair[0].clone(),
                end: pair[1].clone(),
                distance_miles: leg_miles,
                duration_hours: leg_hours,
            })
            .collect();

        let shape: Vec<(f64, f64)> =
            points.iter().map(|p| (p.latitude, p.longitude)).collect();

        debug!(distance_miles, duration_hours, legs = leg_count, "estimated route");
        Ok(RoutePlan {
            polyline: polyline::encode(&shape),
            distance_miles,
            duration_hours,
            legs,
        })
    }
}
