//! Error types for machine activation.

use activator_crypto::CryptoError;
use activator_store::StoreError;
use thiserror::Error;

/// Activation failures.
///
/// Each variant maps to one HTTP status and one generic public message.
/// The `Display` text may carry detail for logs; it is never sent to the
/// client.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// A required request field was absent or empty.
    #[error("missing required parameters: {0}")]
    MissingParameters(String),

    /// The request was present but malformed.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// No token with the supplied value exists.
    #[error("installation token not found")]
    TokenNotFound,

    /// The token was activated already.
    #[error("installation token already used")]
    TokenAlreadyUsed,

    /// The token's expiry has passed.
    #[error("installation token expired")]
    TokenExpired,

    /// Key parsing, sealing or wrapping failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// The token store failed; nothing was committed.
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// The script content could not be fetched in time.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ActivationError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameters(_) | Self::InvalidParameters(_) => 400,
            Self::TokenNotFound => 404,
            Self::TokenAlreadyUsed | Self::TokenExpired => 403,
            Self::UpstreamFetch(_) => 502,
            Self::Crypto(_) | Self::Persistence(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if the same request may succeed when retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::UpstreamFetch(_))
    }

    /// Message safe to show to an unauthenticated caller.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MissingParameters(_) => "missing required parameters",
            Self::InvalidParameters(_) => "invalid request",
            Self::TokenNotFound => "installation token not found",
            Self::TokenAlreadyUsed => "installation token already used",
            Self::TokenExpired => "installation token expired",
            Self::UpstreamFetch(_) => "script source unavailable",
            Self::Crypto(_) | Self::Persistence(_) | Self::Internal(_) => "activation failed",
        }
    }
}

/// Result type for activation operations.
pub type ActivationResult<T> = Result<T, ActivationError>;
