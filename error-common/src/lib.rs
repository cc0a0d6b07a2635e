//! Common error handling utilities for the expand service
//!
//! This crate provides the process-level error type shared by the service
//! binary and its transports, plus the machine-readable reason codes that
//! appear in HTTP error bodies.
//!
//! # Error Categories
//!
//! - **ConfigError**: configuration file or environment could not be loaded
//! - **NetworkError**: listener could not be bound
//! - **ServerError**: the HTTP server stopped with an error
//! - **GrpcError**: the gRPC server stopped with an error
//! - **Other**: any wrapped `anyhow` error, reported as-is
//!
//! Request-scoped failures (bad input, engine errors) are not represented
//! here; each transport renders those itself.
//!
//! # Example
//!
//! ```rust
//! use error_common::{ExpandServiceError, Result};
//!
//! fn parse_port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|e| ExpandServiceError::ConfigError(format!("invalid port {raw:?}: {e}")))
//! }
//!
//! assert!(parse_port("4466").is_ok());
//! assert!(parse_port("http").is_err());
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
