//! Business logic and repository trait definitions for chatstore.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the chat service that enforces validation and ordering
//! rules, and the `ChatOperations` capability the transport layer consumes.
//! It depends only on `chatstore-types` -- never on `chatstore-infra` or any
//! database/IO crate.

pub mod chat;
