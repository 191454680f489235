//! Chat and message records.
//!
//! Both records are owned by the store: ids and timestamps are assigned on
//! insert and never change afterwards. Serialized field names are the wire
//! format of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named conversation container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Trimmed, 1-200 code points.
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A single text entry belonging to exactly one chat.
///
/// Deleting the parent chat deletes the message (cascade in the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    /// Trimmed, 1-5000 code points.
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A chat together with its most recent messages, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatWithMessages {
    pub chat: Chat,
    pub messages: Vec<Message>,
}

/// Body of `POST /chats`.
///
/// A missing `title` deserializes as an empty string so it is rejected by
/// validation rather than by the JSON decoder.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub title: String,
}

/// Body of `POST /chats/{id}/messages`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_serializes_wire_fields() {
        let chat = Chat {
            id: 7,
            title: "Test chat".to_string(),
            created_at: "2026-01-02T03:04:05.678Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Test chat");
        assert_eq!(json["created_at"], "2026-01-02T03:04:05.678Z");
    }

    #[test]
    fn test_chat_with_messages_shape() {
        let created_at: DateTime<Utc> = "2026-01-02T03:04:05Z".parse().unwrap();
        let view = ChatWithMessages {
            chat: Chat {
                id: 1,
                title: "t".to_string(),
                created_at,
            },
            messages: vec![Message {
                id: 3,
                chat_id: 1,
                text: "hi".to_string(),
                created_at,
            }],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["chat"]["id"], 1);
        assert_eq!(json["messages"][0]["chat_id"], 1);
        assert_eq!(json["messages"][0]["text"], "hi");
    }

    #[test]
    fn test_create_chat_request_rejects_unknown_fields() {
        let err = serde_json::from_str::<CreateChatRequest>(r#"{"title":"a","extra":1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_create_message_request_missing_text_is_empty() {
        let req: CreateMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_empty());
    }
}
