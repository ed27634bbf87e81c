//! Domain Errors
//!
//! Error types for repository operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("User {user_id} is not subscribed to feed {feed_id}")]
    NotSubscribed { user_id: String, feed_id: String },

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn not_subscribed(user_id: &str, feed_id: &str) -> Self {
        Self::NotSubscribed {
            user_id: user_id.to_string(),
            feed_id: feed_id.to_string(),
        }
    }

    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        Self::Storage(err.to_string())
    }
}
