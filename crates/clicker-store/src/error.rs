//! Error types for clicker storage.

use clicker_core::{EconomyError, PlayerKey};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Player record not found.
    #[error("player not found: {key}")]
    PlayerNotFound {
        /// The key that was not found.
        key: PlayerKey,
    },

    /// Player record already exists.
    #[error("player already exists: {key}")]
    PlayerAlreadyExists {
        /// The key that already exists.
        key: PlayerKey,
    },

    /// An economy rule rejected the operation; nothing was changed.
    #[error(transparent)]
    Rejected(#[from] EconomyError),

    /// File operation failed.
    #[error("io error on {path}: {message}")]
    Io {
        /// The file involved.
        path: String,
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    LockPoisoned,
}
