use std::fmt;
use std::sync::Arc;

use expand_engine::{EngineError, ExpandEngine, ExpandTree};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::request::{validate_subject_set, ExpandRequest, RequestError};

/// Outcome of a failed expansion, before a transport renders it
#[derive(Debug, Error)]
pub enum ExpandFailure {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Validates expand requests and hands them to the engine
///
/// Holds nothing but the engine handle, so cloning is cheap and every
/// transport can own a copy.
#[derive(Clone)]
pub struct ExpandAdapter {
    engine: Arc<dyn ExpandEngine>,
}

impl fmt::Debug for ExpandAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandAdapter").finish_non_exhaustive()
    }
}

impl ExpandAdapter {
    pub fn new(engine: Arc<dyn ExpandEngine>) -> Self {
        Self { engine }
    }

    /// Validate the request and expand it with a single engine call
    ///
    /// The depth is passed through untouched. Engine errors come back as-is.
    #[instrument(
        skip(self, request),
        fields(subject_set = %request.subject_set, max_depth = request.max_depth)
    )]
    pub async fn expand(&self, request: ExpandRequest) -> Result<ExpandTree, ExpandFailure> {
        validate_subject_set(&request.subject_set).map_err(RequestError::MissingField)?;

        let tree = self
            .engine
            .build_tree(&request.subject_set, request.max_depth)
            .await?;

        debug!(children = tree.children.len(), "expanded subject set");
        Ok(tree)
    }
}
