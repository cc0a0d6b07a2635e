//! Expand Server - subject-set expansion over HTTP and gRPC
//!
//! This library provides the request adapter in front of an
//! [`expand_engine::ExpandEngine`]: `GET /expand` on the HTTP side and the
//! `expand.v1.ExpandService/Expand` RPC on the gRPC side. Both transports
//! share one request type, one validation path and one engine call, and only
//! differ in how they render success and failure.

pub mod config;
pub mod error;
pub mod grpc;
pub mod handlers;
pub mod openapi;
pub mod request;
pub mod routes;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::*;
pub use request::{ExpandRequest, RequestError, RequiredField};
pub use server::ExpandServer;
pub use service::{ExpandAdapter, ExpandFailure};

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: ExpandServer) -> Router {
    let router = routes::create_routes().layer(TraceLayer::new_for_http());

    let router = match server.config().request_timeout() {
        Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
        None => router,
    };

    router.with_state(server)
}
