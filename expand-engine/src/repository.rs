use crate::{error::EngineError, models::*};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::Arc;

/// Repository interface for storing relation tuples
#[async_trait]
pub trait TupleRepository: Send + Sync {
    /// Write a single tuple
    async fn write_tuple(&self, tuple: RelationTuple) -> Result<(), EngineError>;

    /// Delete a single tuple; deleting an absent tuple is not an error
    async fn delete_tuple(&self, tuple: &RelationTuple) -> Result<(), EngineError>;

    /// Read tuples matching the given filter, ordered by their text form
    async fn read_tuples(&self, query: &TupleQuery) -> Result<Vec<RelationTuple>, EngineError>;

    async fn namespace_exists(&self, namespace: &str) -> Result<bool, EngineError>;
}

/// In-memory tuple repository for testing and development
///
/// Only tuples in registered namespaces can be written or read; anything
/// else is reported as `NamespaceNotFound`. A subject set used as a tuple's
/// subject must live in a registered namespace too, so every stored member
/// can be expanded.
pub struct InMemoryTupleRepository {
    tuples: Arc<DashMap<String, RelationTuple>>,
    namespaces: Arc<DashSet<String>>,
}

impl InMemoryTupleRepository {
    pub fn new<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tuples: Arc::new(DashMap::new()),
            namespaces: Arc::new(namespaces.into_iter().map(Into::into).collect()),
        }
    }

    pub fn register_namespace(&self, namespace: &str) {
        self.namespaces.insert(namespace.to_string());
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    fn ensure_namespace(&self, namespace: &str) -> Result<(), EngineError> {
        if self.namespaces.contains(namespace) {
            Ok(())
        } else {
            Err(EngineError::NamespaceNotFound(namespace.to_string()))
        }
    }
}

#[async_trait]
impl TupleRepository for InMemoryTupleRepository {
    async fn write_tuple(&self, tuple: RelationTuple) -> Result<(), EngineError> {
        self.ensure_namespace(&tuple.namespace)?;
        if let Subject::Set(ref set) = tuple.subject {
            self.ensure_namespace(&set.namespace)?;
        }
        self.tuples.insert(tuple.to_string(), tuple);
        Ok(())
    }

    async fn delete_tuple(&self, tuple: &RelationTuple) -> Result<(), EngineError> {
        self.ensure_namespace(&tuple.namespace)?;
        self.tuples.remove(&tuple.to_string());
        Ok(())
    }

    async fn read_tuples(&self, query: &TupleQuery) -> Result<Vec<RelationTuple>, EngineError> {
        if let Some(ref namespace) = query.namespace {
            self.ensure_namespace(namespace)?;
        }

        let mut tuples: Vec<(String, RelationTuple)> = self
            .tuples
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        tuples.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(tuples.into_iter().map(|(_, tuple)| tuple).collect())
    }

    async fn namespace_exists(&self, namespace: &str) -> Result<bool, EngineError> {
        Ok(self.namespaces.contains(namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read_in_key_order() {
        let repo = InMemoryTupleRepository::new(["docs"]);
        repo.write_tuple("docs:file1#viewer@carol".parse().unwrap()).await.unwrap();
        repo.write_tuple("docs:file1#viewer@alice".parse().unwrap()).await.unwrap();
        repo.write_tuple("docs:file2#viewer@bob".parse().unwrap()).await.unwrap();

        let query = TupleQuery::from(&SubjectSet::new("docs", "file1", "viewer"));
        let subjects: Vec<String> = repo
            .read_tuples(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.subject.to_string())
            .collect();

        assert_eq!(subjects, vec!["alice", "carol"]);
        assert_eq!(repo.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_writes_are_idempotent() {
        let repo = InMemoryTupleRepository::new(["docs"]);
        let tuple: RelationTuple = "docs:file1#viewer@alice".parse().unwrap();
        repo.write_tuple(tuple.clone()).await.unwrap();
        repo.write_tuple(tuple).await.unwrap();

        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_namespace_is_not_found() {
        let repo = InMemoryTupleRepository::new(["docs"]);

        let err = repo
            .write_tuple("videos:cat#viewer@alice".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NamespaceNotFound(ref ns) if ns == "videos"));

        let query = TupleQuery::from(&SubjectSet::new("videos", "cat", "viewer"));
        assert!(repo.read_tuples(&query).await.is_err());

        repo.register_namespace("videos");
        assert!(repo.read_tuples(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subject_set_namespace_checked_on_write() {
        let repo = InMemoryTupleRepository::new(["docs"]);

        let err = repo
            .write_tuple("docs:file1#viewer@groups:eng#member".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NamespaceNotFound(ref ns) if ns == "groups"));
        assert!(repo.is_empty());

        repo.register_namespace("groups");
        repo.write_tuple("docs:file1#viewer@groups:eng#member".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_tuple() {
        let repo = InMemoryTupleRepository::new(["docs"]);
        let tuple: RelationTuple = "docs:file1#viewer@alice".parse().unwrap();
        repo.write_tuple(tuple.clone()).await.unwrap();

        repo.delete_tuple(&tuple).await.unwrap();
        assert!(repo.is_empty());

        // deleting again is fine
        repo.delete_tuple(&tuple).await.unwrap();
        assert!(repo.namespace_exists("docs").await.unwrap());
        assert!(!repo.namespace_exists("videos").await.unwrap());
    }
}
