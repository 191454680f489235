//! Normalization and bounds checks for chat titles and message text.
//!
//! Lengths are counted in Unicode code points (`char`s), not bytes.

use chatstore_types::error::ChatError;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_TEXT_CHARS: usize = 5000;

/// Trim and validate a chat title, returning the value to store.
pub fn normalize_title(title: &str) -> Result<&str, ChatError> {
    bounded(title.trim(), MAX_TITLE_CHARS, "title")
}

/// Trim and validate message text, returning the value to store.
pub fn normalize_text(text: &str) -> Result<&str, ChatError> {
    bounded(text.trim(), MAX_TEXT_CHARS, "text")
}

fn bounded<'a>(value: &'a str, max: usize, field: &str) -> Result<&'a str, ChatError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(ChatError::Validation(format!(
            "{field} length must be 1..{max}"
        )));
    }
    Ok(value)
}
