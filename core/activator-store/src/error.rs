//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or initialized.
    #[error("failed to open store: {0}")]
    Open(String),

    /// A query or transaction failed. The transaction, if any, was rolled back.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored row could not be decoded.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// The connection mutex was poisoned by a panicking holder.
    #[error("store connection poisoned")]
    Poisoned,

    /// The blocking task running the query failed.
    #[error("store task failed: {0}")]
    Task(String),
}
