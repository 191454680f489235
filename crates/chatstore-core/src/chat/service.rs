//! Chat service enforcing validation, existence, and ordering rules.
//!
//! ChatService sits between the dispatcher and the ChatRepository: it trims
//! and bounds-checks free text, refuses to write into chats that do not
//! exist, clamps message limits, and presents messages oldest-first.

use chatstore_types::chat::{Chat, ChatWithMessages, Message};
use chatstore_types::error::ChatError;
use tracing::{debug, info};

use crate::chat::operations::ChatOperations;
use crate::chat::repository::ChatRepository;
use crate::chat::validate::{normalize_text, normalize_title};

/// Number of messages returned when the caller asks for 0.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 20;

/// Larger requests are clamped down to this, not rejected.
pub const MAX_MESSAGE_LIMIT: u32 = 100;

/// Domain service over a chat repository.
///
/// Generic over `ChatRepository` to maintain clean architecture
/// (chatstore-core never depends on chatstore-infra).
pub struct ChatService<R: ChatRepository> {
    repo: R,
}

impl<R: ChatRepository> ChatService<R> {
    /// Create a new chat service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the chat repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Create a chat. The stored title is the trimmed input.
    pub async fn create_chat(&self, title: &str) -> Result<Chat, ChatError> {
        let title = normalize_title(title)?;
        let chat = self.repo.create_chat(title).await?;
        info!(chat_id = chat.id, "Chat created");
        Ok(chat)
    }

    /// Post a message into an existing chat.
    ///
    /// The existence check and the insert are two separate store calls. If the
    /// chat is deleted in between, the insert fails on the foreign key and the
    /// caller sees a storage error.
    pub async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, ChatError> {
        let text = normalize_text(text)?;
        self.repo.get_chat_by_id(chat_id).await?;
        let message = self.repo.create_message(chat_id, text).await?;
        debug!(chat_id, message_id = message.id, "Message created");
        Ok(message)
    }

    /// Fetch a chat and up to `limit` of its most recent messages, oldest first.
    pub async fn get_chat_with_messages(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> Result<ChatWithMessages, ChatError> {
        let limit = normalize_limit(limit)?;
        let chat = self.repo.get_chat_by_id(chat_id).await?;

        // Newest-first from the store, reversed once here.
        let mut messages = self.repo.list_last_messages(chat_id, limit).await?;
        messages.reverse();

        debug!(chat_id, limit, count = messages.len(), "Chat fetched");
        Ok(ChatWithMessages { chat, messages })
    }

    /// Delete a chat. Messages are removed by the store's cascade.
    pub async fn delete_chat(&self, chat_id: i64) -> Result<(), ChatError> {
        self.repo.delete_chat(chat_id).await?;
        info!(chat_id, "Chat deleted");
        Ok(())
    }
}

impl<R: ChatRepository + 'static> ChatOperations for ChatService<R> {
    async fn create_chat(&self, title: &str) -> Result<Chat, ChatError> {
        ChatService::create_chat(self, title).await
    }

    async fn create_message(&self, chat_id: i64, text: &str) -> Result<Message, ChatError> {
        ChatService::create_message(self, chat_id, text).await
    }

    async fn get_chat_with_messages(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> Result<ChatWithMessages, ChatError> {
        ChatService::get_chat_with_messages(self, chat_id, limit).await
    }

    async fn delete_chat(&self, chat_id: i64) -> Result<(), ChatError> {
        ChatService::delete_chat(self, chat_id).await
    }
}

/// Map a requested limit onto `1..=MAX_MESSAGE_LIMIT`.
///
/// 0 selects the default, values above the maximum are clamped, negative
/// values are rejected.
pub fn normalize_limit(limit: i64) -> Result<u32, ChatError> {
    match limit {
        0 => Ok(DEFAULT_MESSAGE_LIMIT),
        n if n < 0 => Err(ChatError::Validation(
            "limit must be positive".to_string(),
        )),
        n if n > i64::from(MAX_MESSAGE_LIMIT) => Ok(MAX_MESSAGE_LIMIT),
        n => Ok(n as u32),
    }
}
