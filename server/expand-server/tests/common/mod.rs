//! Shared fixtures for the expand-server integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use expand_engine::{EngineError, ExpandEngine, ExpandTree, Subject, SubjectSet};
use expand_server::{ExpandServer, ServerConfig};
use parking_lot::Mutex;

/// What the engine should answer with
pub enum Reply {
    Tree(ExpandTree),
    NotFound(String),
    Internal(String),
}

/// Engine double that records every call it receives
pub struct RecordingEngine {
    calls: Mutex<Vec<(SubjectSet, i64)>>,
    reply: Reply,
}

impl RecordingEngine {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply,
        })
    }

    pub fn returning(tree: ExpandTree) -> Arc<Self> {
        Self::new(Reply::Tree(tree))
    }

    pub fn calls(&self) -> Vec<(SubjectSet, i64)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ExpandEngine for RecordingEngine {
    async fn build_tree(
        &self,
        subject: &SubjectSet,
        max_depth: i64,
    ) -> Result<ExpandTree, EngineError> {
        self.calls.lock().push((subject.clone(), max_depth));
        match &self.reply {
            Reply::Tree(tree) => Ok(tree.clone()),
            Reply::NotFound(namespace) => Err(EngineError::NamespaceNotFound(namespace.clone())),
            Reply::Internal(message) => Err(EngineError::RepositoryError(message.clone())),
        }
    }
}

/// `docs:file1#viewer` holding alice and the `groups:eng#member` set, which holds bob
pub fn two_level_tree() -> ExpandTree {
    ExpandTree::union(
        Subject::set("docs", "file1", "viewer"),
        vec![
            ExpandTree::leaf(Subject::id("alice")),
            ExpandTree::union(
                Subject::set("groups", "eng", "member"),
                vec![ExpandTree::leaf(Subject::id("bob"))],
            ),
        ],
    )
}

pub fn server_with(engine: Arc<RecordingEngine>) -> ExpandServer {
    ExpandServer::with_engine(ServerConfig::default(), engine)
}
