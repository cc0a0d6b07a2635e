use axum::Json;
use utoipa::OpenApi;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::expand::get_expand,
        crate::handlers::health::alive,
        crate::handlers::health::ready,
    ),
    components(
        schemas(
            expand_engine::ExpandTree,
            expand_engine::NodeType,
            crate::error::ApiErrorResponse,
            crate::error::ApiErrorBody,
            crate::handlers::health::HealthStatus,
        )
    ),
    tags(
        (name = "read", description = "Subject set expansion"),
        (name = "health", description = "Liveness and readiness probes"),
    ),
    info(
        title = "Expand Service API",
        version = "1.0.0",
        description = "Expands a subject set into the tree of subjects that hold the relation.",
    ),
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
