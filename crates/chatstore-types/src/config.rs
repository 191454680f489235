//! Service configuration types for chatstore.
//!
//! `ServiceConfig` represents the `config.toml` that controls the HTTP
//! listener and the database connection. All fields have sensible defaults,
//! so an empty file (or no file) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request bodies larger than this are rejected as malformed.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    1 << 20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL. `None` resolves to `{data_dir}/chatstore.db`.
    #[serde(default)]
    pub url: Option<String>,

    /// Size of the read-only connection pool.
    #[serde(default = "default_reader_connections")]
    pub reader_connections: u32,

    /// Maximum wait for a pooled connection.
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,

    /// Deadline applied to every repository call.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// SQLite busy timeout for lock contention.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_reader_connections() -> u32 {
    8
}

fn default_acquire_timeout_ms() -> u64 {
    3_000
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            reader_connections: default_reader_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            query_timeout_ms: default_query_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}
