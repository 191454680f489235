//! ChatRepository trait definition.
//!
//! Typed access to the store for chats and messages. No business validation
//! happens here: implementations only translate "no such row" into
//! `RepositoryError::NotFound` and wrap every other failure.

use chatstore_types::chat::{Chat, Message};
use chatstore_types::error::RepositoryError;

/// Repository trait for chat and message persistence.
///
/// Implementations live in chatstore-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Insert a chat with an already-validated title.
    ///
    /// Returns the stored record with its store-assigned id and timestamp.
    fn create_chat(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Get a chat by id. `RepositoryError::NotFound` if absent.
    fn get_chat_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// Insert a message into an existing chat.
    fn create_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// The most recent `limit` messages of a chat, ordered newest first.
    fn list_last_messages(
        &self,
        chat_id: i64,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Delete a chat; its messages go with it (cascade in the store).
    ///
    /// `RepositoryError::NotFound` if no row matched.
    fn delete_chat(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
