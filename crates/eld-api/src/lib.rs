//! ELD planner API /v1: REST endpoints over the planning core.
pub mod dto;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/trips/plan", post(handlers::plan_trip))
        .route("/v1/trips/{id}", get(handlers::get_trip))
        .route("/v1/trips/{id}/logs", get(handlers::get_trip_logs))
        .route("/v1/health", get(handlers::health))
        .route("/v1/metrics", get(handlers::prometheus_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(addr: &str) {
    let app = create_app(AppState::default());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("ELD planner API listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
