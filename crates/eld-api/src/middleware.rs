//! CORS for the browser-facing frontend; tracing is layered in `create_app`.
use tower_http::cors::CorsLayer;

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}
