//! Relation tuple model and subject-set expansion for the expand service
//!
//! This crate holds everything the request adapter treats as "the engine":
//! - The domain types shared by every transport (`SubjectSet`, `Subject`, `ExpandTree`)
//! - The `ExpandEngine` capability the adapter delegates to
//! - The `EngineError` taxonomy, which classifies its own failures
//! - A tuple repository and a reference engine that walks stored tuples
//!
//! # Core Concepts
//!
//! - **Subject set**: `namespace:object#relation`, the set of subjects holding `relation` on `object`
//! - **Subject**: either a plain subject id or a nested subject set
//! - **Relation tuple**: `namespace:object#relation@subject`
//! - **Expansion tree**: every subject reachable from a subject set, bounded by a depth
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use expand_engine::{
//!     ExpandEngine, InMemoryTupleRepository, NodeType, RelationTuple, SubjectSet,
//!     TupleExpandEngine, TupleRepository,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = Arc::new(InMemoryTupleRepository::new(["docs"]));
//!     repo.write_tuple("docs:file1#viewer@alice".parse::<RelationTuple>()?).await?;
//!
//!     let engine = TupleExpandEngine::new(repo);
//!     let tree = engine
//!         .build_tree(&SubjectSet::new("docs", "file1", "viewer"), 3)
//!         .await?;
//!
//!     assert_eq!(tree.node_type, NodeType::Union);
//!     assert_eq!(tree.children.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod expand;
pub mod models;
pub mod repository;

pub use engine::*;
pub use error::*;
pub use expand::*;
pub use models::*;
pub use repository::*;
