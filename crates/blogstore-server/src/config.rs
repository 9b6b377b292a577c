// ABOUTME: Configuration loading and validation for the blogstore server.
// ABOUTME: Reads environment variables for the storage directory and bind address.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "data/blogs";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BLOGSTORE_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BlogstoreConfig {
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
}

impl BlogstoreConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - BLOGSTORE_DATA_DIR: directory holding one JSON file per post (default: data/blogs)
    /// - BLOGSTORE_BIND: socket address to bind (default: 127.0.0.1:8080)
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var("BLOGSTORE_DATA_DIR")
            .ok()
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let bind_str =
            std::env::var("BLOGSTORE_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = parse_bind(&bind_str)?;

        Ok(Self { data_dir, bind })
    }
}

/// Parse a socket address, reporting the offending input on failure.
pub fn parse_bind(s: &str) -> Result<SocketAddr, ConfigError> {
    s.parse()
        .map_err(|_| ConfigError::InvalidBind(s.to_string()))
}
