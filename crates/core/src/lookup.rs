//! Result channel for cache lookups.
//!
//! A lookup either succeeds with a value or fails with a human-readable message naming the key
//! that was queried. There is no partial success. Callers branch on the outcome before touching
//! the value; a miss is an expected runtime condition, not an error to propagate.

/// A failed lookup, carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct NotFound {
    message: String,
}

impl NotFound {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of a cache query.
pub type Lookup<T> = std::result::Result<T, NotFound>;
