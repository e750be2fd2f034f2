//! Storage Layer
//!
//! Persists user reviews as a single JSON array document.

mod reviews;

pub use reviews::{NewReview, ReviewEntry, ReviewStore, DEFAULT_RATING, DEFAULT_REVIEWER};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}
