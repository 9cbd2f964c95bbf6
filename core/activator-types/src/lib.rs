//! Core type definitions for the machine activation service.
//!
//! This crate defines the data model shared by every other crate:
//! - Script and token identifiers (UUID v7)
//! - Install-session tokens and their one-way status lifecycle
//! - Script artifacts and their per-platform execution config
//! - Activation audit records
//!
//! Storage, crypto and HTTP concerns live in their own crates and only
//! exchange these types.

mod ids;
mod record;
mod script;
mod token;

pub use ids::{ActivationId, ScriptId, TokenId};
pub use record::ActivationRecord;
pub use script::{ExecutionConfig, ExecutionMetadata, PlatformKey, ScriptArtifact};
pub use token::{
    DEFAULT_TOKEN_TTL_HOURS, EffectiveStatus, InstallationToken, TOKEN_VALUE_BYTES, TokenStatus,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid token status: {0}")]
    InvalidStatus(String),

    #[error("invalid platform key: {0}")]
    InvalidPlatform(String),

    #[error("invalid token lifetime: {0}")]
    InvalidTtl(String),
}
