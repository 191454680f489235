//! Shared domain types for chatstore.
//!
//! This crate contains the records exchanged between every layer (Chat,
//! Message), the error taxonomy, and the service configuration types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
