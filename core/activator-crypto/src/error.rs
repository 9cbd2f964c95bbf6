//! Error types for the encryption layer.
//!
//! Messages are safe to surface: none of them carry key material, plaintext,
//! or the text of an underlying library error.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The client public key could not be decoded or parsed.
    #[error("invalid client public key")]
    InvalidPublicKey,

    /// A private key could not be parsed or exported.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// RSA key pair generation failed.
    #[error("key generation failed")]
    KeyGeneration,

    /// Wrapping the session key under the public key failed.
    #[error("session key wrap failed")]
    KeyWrap,

    /// Unwrapping the session key failed (wrong private key or tampered data).
    #[error("session key unwrap failed")]
    KeyUnwrap,

    /// Symmetric encryption failed.
    #[error("payload encryption failed")]
    Encryption,

    /// Symmetric decryption failed (wrong key or tampered data).
    #[error("payload decryption failed")]
    Decryption,

    /// Invalid key length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Encrypted blob shorter than iv + tag.
    #[error("encrypted blob too short: need at least {min} bytes, got {actual}")]
    BlobTooShort { min: usize, actual: usize },

    /// A base64 field could not be decoded.
    #[error("invalid base64 in {0}")]
    InvalidEncoding(&'static str),
}
