//! The four chat operations as a capability.
//!
//! The HTTP dispatcher is generic over this trait so it can run against the
//! production `ChatService` or a test double.

use chatstore_types::chat::{Chat, ChatWithMessages, Message};
use chatstore_types::error::ChatError;

pub trait ChatOperations: Send + Sync + 'static {
    /// Create a chat from an untrimmed title.
    fn create_chat(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Chat, ChatError>> + Send;

    /// Post a message into an existing chat.
    fn create_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Message, ChatError>> + Send;

    /// Fetch a chat and its most recent messages, oldest first.
    ///
    /// `limit` is the raw requested count: 0 means default, negative is rejected.
    fn get_chat_with_messages(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<ChatWithMessages, ChatError>> + Send;

    /// Delete a chat and, through the store, all of its messages.
    fn delete_chat(
        &self,
        chat_id: i64,
    ) -> impl std::future::Future<Output = Result<(), ChatError>> + Send;
}
