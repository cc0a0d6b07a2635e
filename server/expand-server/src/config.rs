//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: the path given on the command line, or `expand-server.{yaml,toml,json}` in the working directory
//! 3. Environment variables: `EXPAND__*` (e.g. `EXPAND__HTTP_PORT=4466`)
//! 4. Command line flags, applied by the binary

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use error_common::{ExpandServiceError, Result};
use serde::{Deserialize, Serialize};

/// Default config file basename searched in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "expand-server";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Bind host for both listeners
    pub host: String,
    /// HTTP listener port
    pub http_port: u16,
    /// gRPC listener port
    pub grpc_port: u16,
    /// Serve the gRPC transport next to HTTP
    pub enable_grpc: bool,
    /// Per-request deadline in seconds; unset means no deadline
    pub request_timeout_secs: Option<u64>,
    /// Namespaces known to the built-in tuple engine
    pub namespaces: Vec<String>,
    /// Relation tuples loaded into the built-in engine at startup
    pub relation_tuples: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Expand Service".to_string(),
            host: "0.0.0.0".to_string(),
            http_port: 4466,
            grpc_port: 4467,
            enable_grpc: false,
            request_timeout_secs: Some(30),
            namespaces: Vec::new(),
            relation_tuples: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an explicitly given file is missing, any
    /// source fails to parse, or the merged result does not deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix("EXPAND")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("namespaces")
                    .with_list_parse_key("relation_tuples")
                    .try_parsing(true),
            )
            .build()
            .and_then(|config| config.try_deserialize::<Self>())
            .map_err(config_error)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn grpc_addr(&self) -> String {
        format!("{}:{}", self.host, self.grpc_port)
    }
}

fn config_error(err: config::ConfigError) -> ExpandServiceError {
    ExpandServiceError::ConfigError(err.to_string())
}
