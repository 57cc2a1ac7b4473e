//! Auth error types.

use kira_cache::StorageError;
use thiserror::Error;

/// Errors that can occur when managing client auth state.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token slot could not be read or written.
    #[error("Auth storage error: {0}")]
    Storage(#[from] StorageError),

    /// An operation required a credential but none is present.
    #[error("Not logged in")]
    MissingToken,
}
