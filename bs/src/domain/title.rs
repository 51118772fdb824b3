//! Title validation at the UI boundary
//!
//! The reducer trusts its callers: trimming, the non-empty check, and the
//! length caps all happen here, before an action is ever constructed.

use thiserror::Error;

/// Errors from title validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("title must not be empty")]
    Empty,

    #[error("title exceeds {max} characters (got {len})")]
    TooLong { max: usize, len: usize },
}

/// Trim and validate a user-supplied title
pub fn validate_title(raw: &str, max_len: usize) -> Result<String, TitleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(TitleError::TooLong { max: max_len, len });
    }
    Ok(trimmed.to_string())
}
