//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
///
/// Note that a rejected login or registration is NOT an error here - it is a
/// state transition into the error state, surfaced via
/// [`AuthState::error`](super::AuthState). These variants cover the
/// infrastructure around the store.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Local storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The session payload could not be serialized.
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
