//! Chat and message use cases.
//!
//! - `repository`: persistence port implemented by the infrastructure layer
//! - `validate`: normalization and bounds checks for free-text fields
//! - `service`: `ChatService`, the domain service over a repository
//! - `operations`: `ChatOperations`, the capability the router dispatches to

pub mod operations;
pub mod repository;
pub mod service;
pub mod validate;
