//! Error types for content providers.

use thiserror::Error;

/// Result type for content provider operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors that can occur while fetching script content.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Nothing is stored at the path.
    #[error("artifact not found: {0}")]
    NotFound(String),

    /// Transport failure reaching the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with an unexpected status.
    #[error("upstream returned status {status}")]
    Upstream { status: u16 },

    /// The provider's response could not be decoded.
    #[error("invalid upstream response: {0}")]
    Decode(String),

    /// The request did not complete in time.
    #[error("upstream request timed out")]
    Timeout,

    /// The provider could not be configured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ArtifactError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(e.to_string())
        }
    }
}
