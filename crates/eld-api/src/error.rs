//! Maps core and collaborator errors to transport responses. The core never
//! retries or swallows; every failure surfaces here exactly once.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use eld_core::EldError;
use eld_route::RouteError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unprocessable(String),
    NotFound(String),
    Internal(String),
}

impl From<EldError> for ApiError {
    fn from(err: EldError) -> Self {
        match err {
            EldError::InputValidation(_) => ApiError::BadRequest(err.to_string()),
            // A business-rule failure, not a malformed request.
            EldError::Infeasible(_) => ApiError::Unprocessable(err.to_string()),
            EldError::InvalidGridConfig(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::Geocode(_) => ApiError::BadRequest(err.to_string()),
            RouteError::Routing(_) | RouteError::Polyline(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
