//! Path dispatcher for the `/chats` resource tree.
//!
//! [`resolve`] is a pure function of method and path. Keeping it free of axum
//! types other than [`Method`] lets the routing table be tested exhaustively
//! without building requests.

use axum::http::Method;

/// Collection prefix every chat route lives under.
pub const CHATS_PREFIX: &str = "/chats";

/// Outcome of routing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    CreateChat,
    GetChat(i64),
    DeleteChat(i64),
    CreateMessage(i64),
    MethodNotAllowed,
    NotFound,
}

/// Map a method and path to the chat operation it names.
pub fn resolve(method: &Method, path: &str) -> Dispatch {
    let Some(rest) = path.strip_prefix(CHATS_PREFIX) else {
        return Dispatch::NotFound;
    };
    // `/chats7` shares the prefix but not the segment.
    if !rest.is_empty() && !rest.starts_with('/') {
        return Dispatch::NotFound;
    }

    let rest = rest.trim_matches('/');
    if rest.is_empty() {
        return if method == Method::POST {
            Dispatch::CreateChat
        } else {
            Dispatch::NotFound
        };
    }

    let segments: Vec<&str> = rest.split('/').collect();
    let Some(id) = parse_chat_id(segments[0]) else {
        return Dispatch::NotFound;
    };

    match segments.as_slice() {
        [_] => match *method {
            Method::GET => Dispatch::GetChat(id),
            Method::DELETE => Dispatch::DeleteChat(id),
            _ => Dispatch::MethodNotAllowed,
        },
        [_, "messages"] => {
            if method == Method::POST {
                Dispatch::CreateMessage(id)
            } else {
                Dispatch::MethodNotAllowed
            }
        }
        _ => Dispatch::NotFound,
    }
}

/// Chat ids are positive; anything else cannot name a chat.
fn parse_chat_id(segment: &str) -> Option<i64> {
    segment.parse::<i64>().ok().filter(|id| *id > 0)
}
