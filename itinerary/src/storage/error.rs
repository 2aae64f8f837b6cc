//! Storage error types.

use std::path::PathBuf;

use crate::domain::{TripId, ValidationError};

/// Errors from the key-value store and the trip codec.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing a backing file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored text could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A write would exceed the store's capacity
    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Key contains characters the backend cannot store
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// Decoded data breaks a model invariant
    #[error("invalid stored data: {0}")]
    Invalid(#[from] ValidationError),

    /// Two stored trips share an id
    #[error("duplicate trip id {0} in stored data")]
    DuplicateTrip(TripId),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
