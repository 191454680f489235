use std::time::Duration;

use thiserror::Error;

/// Errors from repository operations (used by trait definitions in chatstore-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Domain errors returned by the chat service.
///
/// The set is closed: the transport layer matches on the variant to pick a
/// status code and never inspects the message text.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Bad input shape, length, or range. Always caller-caused.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced chat does not exist.
    #[error("not found")]
    NotFound,

    /// I/O, connectivity, timeout, or integrity failure in the store.
    #[error("storage error: {0}")]
    Store(String),
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ChatError::NotFound,
            other => ChatError::Store(other.to_string()),
        }
    }
}
