use thiserror::Error;

/// Process-level error for the expand service
#[derive(Error, Debug)]
pub enum ExpandServiceError {
    /// gRPC service errors
    #[error("gRPC error: {0}")]
    GrpcError(String),

    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExpandServiceError {
    /// Short, stable name of the error category, used as a log field
    pub fn category(&self) -> &'static str {
        match self {
            Self::GrpcError(_) => "grpc",
            Self::NetworkError(_) => "network",
            Self::ServerError(_) => "server",
            Self::ConfigError(_) => "config",
            Self::Other(_) => "internal",
        }
    }
}

/// Result type alias for expand service operations
pub type Result<T> = std::result::Result<T, ExpandServiceError>;

/// Async logging function for errors
pub async fn log_error(context: &str, error: &ExpandServiceError) {
    tracing::error!(
        context = context,
        category = error.category(),
        error = %error,
        "expand service error occurred"
    );
}
