//! Application state wiring the chat service to its SQLite store.
//!
//! `AppState` holds the concrete service used by both the CLI and the REST
//! API. The service is generic over its repository; `AppState` pins it to the
//! infra implementation and keeps the pool so it can be closed on shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use chatstore_core::chat::service::ChatService;
use chatstore_infra::sqlite::chat::SqliteChatRepository;
use chatstore_infra::sqlite::pool::DatabasePool;
use chatstore_types::config::ServiceConfig;

/// The chat service pinned to the SQLite repository.
pub type ConcreteChatService = ChatService<SqliteChatRepository>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
    pub config: ServiceConfig,
}

impl AppState {
    /// Open the database (creating its directory and running migrations) and
    /// wire the chat service on top of it.
    pub async fn init(config: ServiceConfig, database_url: &str) -> anyhow::Result<Self> {
        if let Some(parent) = sqlite_file_path(database_url).and_then(|p| p.parent().map(PathBuf::from)) {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(&parent).await?;
            }
        }

        let db_pool = DatabasePool::connect(database_url, &config.database).await?;
        let chat_service = Arc::new(ChatService::new(SqliteChatRepository::new(db_pool.clone())));

        tracing::debug!(url = %database_url, "Application state initialized");

        Ok(Self {
            chat_service,
            db_pool,
            config,
        })
    }

    /// Release the database connections.
    pub async fn shutdown(&self) {
        self.db_pool.close().await;
    }
}

/// Filesystem path of a file-backed SQLite URL, `None` for in-memory databases.
fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(PathBuf::from(path))
    }
}
