use crate::{
    engine::ExpandEngine,
    error::EngineError,
    models::*,
    repository::TupleRepository,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

type ExpandFuture<'a> = Pin<Box<dyn Future<Output = Result<ExpandTree, EngineError>> + Send + 'a>>;

/// Expansion engine that walks stored relation tuples
///
/// Every subject set becomes a union of its members. Members that are
/// themselves subject sets are expanded recursively while depth remains;
/// plain ids, exhausted depth, empty sets and sets already on the current
/// path all end in a leaf.
pub struct TupleExpandEngine {
    repository: Arc<dyn TupleRepository>,
}

impl TupleExpandEngine {
    pub fn new(repository: Arc<dyn TupleRepository>) -> Self {
        Self { repository }
    }

    fn expand_recursive<'a>(
        &'a self,
        set: &'a SubjectSet,
        rest_depth: i64,
        path: &'a mut HashSet<String>,
    ) -> ExpandFuture<'a> {
        Box::pin(async move {
            let node = Subject::Set(set.clone());
            if rest_depth <= 0 {
                return Ok(ExpandTree::leaf(node));
            }

            let key = set.to_string();
            if !path.insert(key.clone()) {
                debug!("Cycle at {}, not expanding again", key);
                return Ok(ExpandTree::leaf(node));
            }

            debug!("Expanding: {} (rest depth {})", key, rest_depth);

            let tuples = self.repository.read_tuples(&TupleQuery::from(set)).await?;
            if tuples.is_empty() {
                path.remove(&key);
                return Ok(ExpandTree::leaf(node));
            }

            let mut children = Vec::with_capacity(tuples.len());
            for tuple in tuples {
                match tuple.subject {
                    Subject::Set(ref child) if rest_depth > 1 => {
                        let subtree = self
                            .expand_recursive(child, rest_depth.saturating_sub(1), &mut *path)
                            .await?;
                        children.push(subtree);
                    }
                    subject => children.push(ExpandTree::leaf(subject)),
                }
            }

            path.remove(&key);
            Ok(ExpandTree::union(node, children))
        })
    }
}

#[async_trait]
impl ExpandEngine for TupleExpandEngine {
    async fn build_tree(
        &self,
        subject: &SubjectSet,
        max_depth: i64,
    ) -> Result<ExpandTree, EngineError> {
        let mut path = HashSet::new();
        self.expand_recursive(subject, max_depth, &mut path).await
    }
}
