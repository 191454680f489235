//! HTTP/REST API layer for chatstore.
//!
//! A single fallback handler feeds every request under `/chats` through the
//! path dispatcher, which selects one of the four chat operations.

pub mod body;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod router;
