use axum::{routing::get, Router};

use crate::{
    handlers::{expand, health},
    openapi,
    server::ExpandServer,
};

/// Route path constants
///
/// utoipa `path = ...` attributes need string literals; keep them equal to these.
pub mod paths {
    pub const EXPAND_ROUTE: &str = "/expand";
    pub const HEALTH_ALIVE: &str = "/health/alive";
    pub const HEALTH_READY: &str = "/health/ready";
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}

/// Create health check routes
pub fn health_routes() -> Router<ExpandServer> {
    Router::new()
        .route(paths::HEALTH_ALIVE, get(health::alive))
        .route(paths::HEALTH_READY, get(health::ready))
}

/// Create read routes
pub fn read_routes() -> Router<ExpandServer> {
    Router::new().route(paths::EXPAND_ROUTE, get(expand::get_expand))
}

/// Create write routes; expansion is read-only so there are none
pub fn write_routes() -> Router<ExpandServer> {
    Router::new()
}

/// Create all routes
pub fn create_routes() -> Router<ExpandServer> {
    Router::new()
        .merge(health_routes())
        .merge(read_routes())
        .merge(write_routes())
        .route(paths::OPENAPI_JSON, get(openapi::openapi_json))
}
