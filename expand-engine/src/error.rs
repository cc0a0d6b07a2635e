use thiserror::Error;

/// How an engine failure should be classified by whoever renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested namespace or subject set does not exist
    NotFound,
    /// The input handed to the engine could not be interpreted
    InvalidInput,
    /// Storage or traversal failure
    Internal,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    #[error("Invalid relation tuple: {0}")]
    InvalidTuple(String),

    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NamespaceNotFound(_) => ErrorKind::NotFound,
            Self::InvalidTuple(_) | Self::InvalidSubject(_) => ErrorKind::InvalidInput,
            Self::RepositoryError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
