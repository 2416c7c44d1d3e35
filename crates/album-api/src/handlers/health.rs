//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use album_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /health
///
/// Answers as long as the process is serving requests at all.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// GET /health/ready
///
/// 200 only when both backing stores respond; 503 otherwise, with the
/// per-dependency breakdown in the body.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let context = state.service_context();

    let database = context.pool().acquire().await.is_ok();
    let cache = context.redis_pool().health_check().await.is_ok();

    let response = ReadinessResponse::ready(database, cache);
    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
