use crate::{error::EngineError, models::*};
use async_trait::async_trait;
use std::sync::Arc;

/// Capability that turns a subject set into an expansion tree
///
/// Implementations own traversal, cycle handling and depth enforcement, and
/// classify their own failures through [`EngineError::kind`]. `max_depth` is
/// handed over exactly as the caller supplied it, including zero and
/// negative values.
#[async_trait]
pub trait ExpandEngine: Send + Sync {
    async fn build_tree(
        &self,
        subject: &SubjectSet,
        max_depth: i64,
    ) -> Result<ExpandTree, EngineError>;
}

#[async_trait]
impl<T: ExpandEngine + ?Sized> ExpandEngine for Arc<T> {
    async fn build_tree(
        &self,
        subject: &SubjectSet,
        max_depth: i64,
    ) -> Result<ExpandTree, EngineError> {
        (**self).build_tree(subject, max_depth).await
    }
}
