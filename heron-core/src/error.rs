//! Core error types

use thiserror::Error;

/// Error type for core computations and persistence
#[derive(Debug, Error)]
pub enum CoreError {
    /// Date string does not parse as YYYY-MM-DD
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Schedule key does not conform to `{agent_id}_{monday}`
    #[error("Invalid schedule key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Persistence failure (file I/O, serialization)
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl CoreError {
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
