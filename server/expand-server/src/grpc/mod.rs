//! gRPC transport: `expand.v1.ExpandService`

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use error_common::{ExpandServiceError, Result as ExpandResult};
use tonic::{transport::Server, Request, Response, Status};
use tracing::{debug, info, warn};

use crate::request::{ExpandRequest, RequestError};
use crate::service::{ExpandAdapter, ExpandFailure};

pub mod conversions;
pub mod proto;

pub use proto::expand_service_server::{ExpandService, ExpandServiceServer};

/// Expand gRPC service implementation
#[derive(Debug, Clone)]
pub struct ExpandServiceImpl {
    adapter: ExpandAdapter,
}

impl ExpandServiceImpl {
    pub fn new(adapter: ExpandAdapter) -> Self {
        Self { adapter }
    }
}

impl From<ExpandFailure> for Status {
    fn from(failure: ExpandFailure) -> Self {
        match failure {
            ExpandFailure::Request(err) => Status::invalid_argument(err.to_string()),
            ExpandFailure::Engine(err) => Status::unknown(err.to_string()),
        }
    }
}

impl From<RequestError> for Status {
    fn from(err: RequestError) -> Self {
        ExpandFailure::from(err).into()
    }
}

#[tonic::async_trait]
impl ExpandService for ExpandServiceImpl {
    async fn expand(
        &self,
        request: Request<proto::ExpandRequest>,
    ) -> Result<Response<proto::ExpandResponse>, Status> {
        let req = request.into_inner();

        let subject_set = conversions::subject_set_from_proto(req.subject).map_err(|e| {
            warn!(error = %e, "rejected gRPC Expand request");
            Status::from(e)
        })?;

        debug!(subject_set = %subject_set, max_depth = req.max_depth, "gRPC Expand");

        let tree = self
            .adapter
            .expand(ExpandRequest::new(subject_set, i64::from(req.max_depth)))
            .await
            .map_err(|e| {
                if let ExpandFailure::Request(ref err) = e {
                    warn!(error = %err, "rejected gRPC Expand request");
                }
                Status::from(e)
            })?;

        Ok(Response::new(proto::ExpandResponse {
            tree: Some(tree.into()),
        }))
    }
}

/// Build the tonic service for the adapter
pub fn expand_service(adapter: ExpandAdapter) -> ExpandServiceServer<ExpandServiceImpl> {
    ExpandServiceServer::new(ExpandServiceImpl::new(adapter))
}

/// Serve `ExpandService` until `shutdown` resolves
///
/// # Errors
///
/// Returns `GrpcError` if the listener cannot be bound or the server fails.
pub async fn start_grpc_server<F>(
    addr: SocketAddr,
    adapter: ExpandAdapter,
    timeout: Option<Duration>,
    shutdown: F,
) -> ExpandResult<()>
where
    F: Future<Output = ()>,
{
    info!("Starting gRPC server on {}", addr);

    let mut builder = Server::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .add_service(expand_service(adapter))
        .serve_with_shutdown(addr, shutdown)
        .await
        .map_err(|e| ExpandServiceError::GrpcError(format!("gRPC server error: {e}")))
}
