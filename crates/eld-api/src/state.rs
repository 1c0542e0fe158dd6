//! Shared application state: planner configuration, collaborator seams, the
//! in-memory trip store, and metrics.
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use eld_core::{EngineConfig, GridConfig, SlicerConfig};
use eld_route::{CoordinateGeocoder, Geocoder, HaversineRouter, RouteProvider};

use crate::dto::TripResponse;
use crate::metrics::ApiMetrics;

/// Planning configuration shared by every request. Passed into each pipeline
/// run explicitly; requests with different configurations never interfere.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    pub engine: EngineConfig,
    pub slicer: SlicerConfig,
    pub grid: GridConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PlannerConfig>,
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn RouteProvider>,
    pub store: TripStore,
    pub metrics: Arc<ApiMetrics>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: Arc::new(PlannerConfig::default()),
            geocoder: Arc::new(CoordinateGeocoder),
            router: Arc::new(HaversineRouter::default()),
            store: TripStore::default(),
            metrics: Arc::new(ApiMetrics::new()),
        }
    }
}

/// A planned trip as served back by the GET endpoints. Durable persistence is
/// an external concern; this store only backs retrieval within the process.
#[derive(Debug, Clone)]
pub struct StoredTrip {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub response: TripResponse,
}

#[derive(Clone, Default)]
pub struct TripStore {
    inner: Arc<RwLock<HashMap<Uuid, StoredTrip>>>,
}

impl TripStore {
    pub async fn insert(&self, trip: StoredTrip) {
        self.inner.write().await.insert(trip.id, trip);
    }

    pub async fn get(&self, id: &Uuid) -> Option<StoredTrip> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{MetaDto, RouteDto};

    fn stored(id: Uuid) -> StoredTrip {
        StoredTrip {
            id,
            created_at: Utc::now(),
            response: TripResponse {
                trip_id: id,
                route: RouteDto {
                    polyline: String::new(),
                    distance_miles: 0.0,
                    duration_hours: 0.0,
                    legs: Vec::new(),
                },
                logs: Vec::new(),
                stops: Vec::new(),
                meta: MetaDto { total_days: 0, total_distance_miles: 0.0 },
            },
        }
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = TripStore::default();
        let id = Uuid::new_v4();
        store.insert(stored(id)).await;
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(&id).await.unwrap().id, id);
        assert!(store.get(&Uuid::new_v4()).await.is_none());
    }
}
