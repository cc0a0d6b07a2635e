use std::sync::Arc;

use error_common::{ExpandServiceError, Result};
use expand_engine::{
    ExpandEngine, InMemoryTupleRepository, RelationTuple, TupleExpandEngine, TupleRepository,
};
use tracing::info;

use crate::config::ServerConfig;
use crate::service::ExpandAdapter;

/// Main expand server state
#[derive(Clone, Debug)]
pub struct ExpandServer {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// Request adapter shared by both transports
    adapter: ExpandAdapter,
}

impl ExpandServer {
    /// Create a server backed by the built-in tuple engine
    ///
    /// The configured namespaces are registered and the configured relation
    /// tuples written before the server is returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a relation tuple does not parse or names an
    /// unregistered namespace.
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let repository = Arc::new(InMemoryTupleRepository::new(config.namespaces.iter().cloned()));

        for line in &config.relation_tuples {
            let tuple: RelationTuple = line.parse().map_err(|e| {
                ExpandServiceError::ConfigError(format!("relation tuple {line:?}: {e}"))
            })?;
            repository.write_tuple(tuple).await.map_err(|e| {
                ExpandServiceError::ConfigError(format!("relation tuple {line:?}: {e}"))
            })?;
        }

        info!(
            namespaces = config.namespaces.len(),
            tuples = repository.len(),
            "loaded relation tuples"
        );

        let engine = Arc::new(TupleExpandEngine::new(repository));
        Ok(Self::with_engine(config, engine))
    }

    /// Create a server around an existing engine
    pub fn with_engine(config: ServerConfig, engine: Arc<dyn ExpandEngine>) -> Self {
        Self {
            config: Arc::new(config),
            adapter: ExpandAdapter::new(engine),
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn adapter(&self) -> &ExpandAdapter {
        &self.adapter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_rejects_bad_tuples() {
        let config = ServerConfig {
            namespaces: vec!["docs".to_string()],
            relation_tuples: vec!["not a tuple".to_string()],
            ..ServerConfig::default()
        };
        let err = ExpandServer::new(config).await.unwrap_err();
        assert!(matches!(err, ExpandServiceError::ConfigError(_)));

        let config = ServerConfig {
            namespaces: vec!["docs".to_string()],
            relation_tuples: vec!["videos:cat#viewer@alice".to_string()],
            ..ServerConfig::default()
        };
        let err = ExpandServer::new(config).await.unwrap_err();
        assert!(err.to_string().contains("Namespace not found: videos"));
    }

    #[tokio::test]
    async fn test_new_rejects_subject_sets_in_unknown_namespaces() {
        let config = ServerConfig {
            namespaces: vec!["docs".to_string()],
            relation_tuples: vec!["docs:file1#viewer@groups:eng#member".to_string()],
            ..ServerConfig::default()
        };

        let err = ExpandServer::new(config).await.unwrap_err();

        assert!(matches!(err, ExpandServiceError::ConfigError(_)));
        assert!(err.to_string().contains("Namespace not found: groups"));
    }
}
