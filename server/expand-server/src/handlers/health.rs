use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}

impl HealthStatus {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health/alive",
    responses(
        (status = 200, description = "The process is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn alive() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// Readiness probe
///
/// The engine is built before the listener binds, so a server that answers
/// is ready.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "The server accepts expand requests", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn ready() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
