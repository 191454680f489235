//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. This module provides a `DatabasePool`
//! with a multi-connection reader pool for concurrent reads and a single-connection
//! writer pool for serialized writes. Both use WAL journal mode and enforce foreign keys,
//! which the cascade from chats to messages depends on.

use std::str::FromStr;
use std::time::Duration;

use chatstore_types::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection pool for concurrent SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERT/DELETE.
/// - `query_timeout`: deadline the repositories apply to every store call.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
    pub query_timeout: Duration,
}

impl DatabasePool {
    /// Open a pool with default settings.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::connect(database_url, &DatabaseConfig::default()).await
    }

    /// Open the writer pool, run migrations on it, then open the reader pool.
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;
        let acquire_timeout = Duration::from_millis(config.acquire_timeout_ms);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_with(write_opts)
            .await?;

        // Run migrations on writer before opening reader pool
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(config.reader_connections.max(1))
            .acquire_timeout(acquire_timeout)
            .connect_with(read_opts)
            .await?;

        info!(
            readers = config.reader_connections,
            query_timeout_ms = config.query_timeout_ms,
            "Database pool opened"
        );

        Ok(Self {
            reader,
            writer,
            query_timeout: Duration::from_millis(config.query_timeout_ms),
        })
    }

    /// Close both pools, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.reader.close().await;
        self.writer.close().await;
        info!("Database pool closed");
    }
}

/// Returns the data directory from `CHATSTORE_DATA_DIR`, falling back to
/// `~/.chatstore`.
pub fn default_data_dir() -> String {
    std::env::var("CHATSTORE_DATA_DIR").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{home}/.chatstore")
    })
}

/// Returns the default database URL inside [`default_data_dir`].
pub fn default_database_url() -> String {
    format!("sqlite://{}/chatstore.db?mode=rwc", default_data_dir())
}
