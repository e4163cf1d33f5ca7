use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::ConnectionTrait;

use crate::{model::api::HealthDto, server::state::AppState};

/// Tag for grouping health endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Liveness and readiness check.
///
/// Runs `SELECT 1` against the database.
///
/// # Returns
/// - `200 OK` - Database reachable
/// - `503 Service Unavailable` - Database query failed
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service healthy", body = HealthDto),
        (status = 503, description = "Database unreachable", body = HealthDto)
    ),
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let connected = match state.db.execute_unprepared("SELECT 1").await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Health check database query failed: {}", e);
            false
        }
    };

    let (status, code, database) = if connected {
        ("healthy", StatusCode::OK, "connected")
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE, "disconnected")
    };

    (
        code,
        Json(HealthDto {
            status: status.to_string(),
            database: database.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: state.config.environment.as_str().to_string(),
        }),
    )
}
