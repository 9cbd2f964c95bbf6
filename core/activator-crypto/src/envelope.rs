//! Hybrid sealing of a payload for one client.
//!
//! # Process
//! 1. Generate a random session key
//! 2. Seal the payload with the session key (AES-256-GCM)
//! 3. Wrap the session key with the client's public key (RSA-OAEP)
//!
//! The session key is dropped (and zeroized) before [`seal_payload`]
//! returns, so every activation gets its own key.

use crate::asymmetric::{ClientKeyPair, ClientPublicKey};
use crate::cipher;
use crate::error::{CryptoError, CryptoResult};
use crate::key::SessionKey;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// The two pieces of cryptographic material returned to a client.
///
/// They are produced together and must be delivered together.
#[derive(Clone, PartialEq, Eq)]
pub struct SealedPayload {
    wrapped_key: Vec<u8>,
    blob: Vec<u8>,
}

impl SealedPayload {
    /// Reassembles a payload from its two base64 wire fields.
    pub fn from_base64(
        encrypted_session_script_key: &str,
        encrypted_script_blob: &str,
    ) -> CryptoResult<Self> {
        let wrapped_key = BASE64
            .decode(encrypted_session_script_key)
            .map_err(|_| CryptoError::InvalidEncoding("encrypted_session_script_key"))?;
        let blob = BASE64
            .decode(encrypted_script_blob)
            .map_err(|_| CryptoError::InvalidEncoding("encrypted_script_blob"))?;
        Ok(Self { wrapped_key, blob })
    }

    /// RSA-OAEP wrapped session key.
    pub fn wrapped_key(&self) -> &[u8] {
        &self.wrapped_key
    }

    /// `iv || ciphertext || tag`.
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Base64 of the wrapped key, sent as `encrypted_session_script_key`.
    pub fn encrypted_session_script_key(&self) -> String {
        BASE64.encode(&self.wrapped_key)
    }

    /// Base64 of the blob, sent as `encrypted_script_blob`.
    pub fn encrypted_script_blob(&self) -> String {
        BASE64.encode(&self.blob)
    }
}

impl std::fmt::Debug for SealedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedPayload")
            .field("wrapped_key_len", &self.wrapped_key.len())
            .field("blob_len", &self.blob.len())
            .finish()
    }
}

/// Seals `payload` so that only the owner of `recipient`'s private key can open it.
pub fn seal_payload(recipient: &ClientPublicKey, payload: &[u8]) -> CryptoResult<SealedPayload> {
    let session_key = SessionKey::generate();
    let blob = cipher::seal(&session_key, payload)?;
    let wrapped_key = recipient.wrap(&session_key)?;
    Ok(SealedPayload { wrapped_key, blob })
}

/// Client side: unwraps the session key and decrypts the blob.
pub fn open_payload(keypair: &ClientKeyPair, sealed: &SealedPayload) -> CryptoResult<Vec<u8>> {
    let session_key = keypair.unwrap_session_key(&sealed.wrapped_key)?;
    cipher::open(&session_key, &sealed.blob)
}
