use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use expand_engine::{EngineError, ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::request::RequestError;
use crate::service::ExpandFailure;

/// Message used for field violations; the reason names the field
pub const BAD_REQUEST_MESSAGE: &str = "The request was malformed or contained invalid parameters";

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorBody {
    /// HTTP status code
    pub code: u16,
    /// Canonical status text, e.g. "Bad Request"
    pub status: String,
    /// Machine-readable error code
    #[schema(example = "VALIDATION_1002")]
    pub error_code: String,
    /// Why the request was rejected, when a single field is to blame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        reason: Option<String>,
        error_code: &'static str,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>, error_code: &'static str) -> Self {
        Self::BadRequest {
            message: message.into(),
            reason: None,
            error_code,
        }
    }

    /// Create a bad request error whose reason names the offending input
    pub fn bad_request_with_reason(reason: impl Into<String>, error_code: &'static str) -> Self {
        Self::BadRequest {
            message: BAD_REQUEST_MESSAGE.to_string(),
            reason: Some(reason.into()),
            error_code,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Engine(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { error_code, .. } => *error_code,
            ApiError::Engine(err) => match err.kind() {
                ErrorKind::NotFound => codes::expand::NOT_FOUND,
                ErrorKind::InvalidInput => codes::expand::INVALID_TUPLE,
                ErrorKind::Internal => codes::expand::ENGINE_FAILURE,
            },
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { reason, .. } => reason.as_deref(),
            ApiError::Engine(_) => None,
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::InvalidDepth(err) => {
                ApiError::bad_request(err.to_string(), codes::validation::INVALID_FORMAT)
            }
            RequestError::MalformedSubject(message) => {
                ApiError::bad_request(message, codes::validation::INVALID_INPUT)
            }
            RequestError::MissingField(field) => ApiError::bad_request_with_reason(
                format!("{field} has to be specified"),
                codes::validation::MISSING_REQUIRED_FIELD,
            ),
        }
    }
}

impl From<ExpandFailure> for ApiError {
    fn from(failure: ExpandFailure) -> Self {
        match failure {
            ExpandFailure::Request(err) => err.into(),
            ExpandFailure::Engine(err) => err.into(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text(), codes::validation::INVALID_INPUT)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_code = self.error_code(),
                status_code = status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_code = self.error_code(),
                status_code = status_code.as_u16(),
                error = %self,
                "Request rejected"
            );
        }

        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: status_code.as_u16(),
                status: status_code
                    .canonical_reason()
                    .unwrap_or_default()
                    .to_string(),
                error_code: self.error_code().to_string(),
                reason: self.reason().map(str::to_string),
                message: self.to_string(),
                error_id,
                timestamp: chrono::Utc::now(),
            },
        };

        (status_code, Json(body)).into_response()
    }
}
