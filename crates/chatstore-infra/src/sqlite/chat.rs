//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `chatstore-core` using sqlx with split read/write pools:
//! raw queries, private Row structs, inserts on the writer with `RETURNING` so
//! store-assigned ids and timestamps come back in one round-trip, lookups on the reader.
//! Every call runs under the pool's query timeout.

use std::future::Future;

use chatstore_core::chat::repository::ChatRepository;
use chatstore_types::chat::{Chat, Message};
use chatstore_types::error::RepositoryError;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Run a store call under the configured deadline.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.pool.query_timeout, fut).await {
            Ok(result) => result.map_err(map_sqlx_error),
            Err(_) => Err(RepositoryError::Timeout(self.pool.query_timeout)),
        }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: i64,
    title: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        Ok(Chat {
            id: self.id,
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: i64,
    chat_id: i64,
    text: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            text: row.try_get("text")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        Ok(Message {
            id: self.id,
            chat_id: self.chat_id,
            text: self.text,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(e.to_string())
        }
        sqlx::Error::Database(ref db)
            if db.is_foreign_key_violation() || db.is_check_violation() =>
        {
            RepositoryError::Conflict(db.message().to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_chat(&self, title: &str) -> Result<Chat, RepositoryError> {
        let row = self
            .bounded(
                sqlx::query("INSERT INTO chats (title) VALUES (?) RETURNING id, title, created_at")
                    .bind(title)
                    .fetch_one(&self.pool.writer),
            )
            .await?;

        ChatRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_chat()
    }

    async fn get_chat_by_id(&self, id: i64) -> Result<Chat, RepositoryError> {
        let row = self
            .bounded(
                sqlx::query("SELECT id, title, created_at FROM chats WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool.reader),
            )
            .await?
            .ok_or(RepositoryError::NotFound)?;

        ChatRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_chat()
    }

    async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, RepositoryError> {
        let row = self
            .bounded(
                sqlx::query(
                    r#"INSERT INTO messages (chat_id, text) VALUES (?, ?)
                       RETURNING id, chat_id, text, created_at"#,
                )
                .bind(chat_id)
                .bind(text)
                .fetch_one(&self.pool.writer),
            )
            .await?;

        MessageRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_message()
    }

    async fn list_last_messages(
        &self,
        chat_id: i64,
        limit: u32,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = self
            .bounded(
                sqlx::query(
                    r#"SELECT id, chat_id, text, created_at FROM messages
                       WHERE chat_id = ?
                       ORDER BY created_at DESC, id DESC
                       LIMIT ?"#,
                )
                .bind(chat_id)
                .bind(i64::from(limit))
                .fetch_all(&self.pool.reader),
            )
            .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let message_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(message_row.into_message()?);
        }

        Ok(messages)
    }

    async fn delete_chat(&self, id: i64) -> Result<(), RepositoryError> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM chats WHERE id = ?")
                    .bind(id)
                    .execute(&self.pool.writer),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
