//! Payload encryption using AES-256-GCM.
//!
//! Blob layout on the wire: `iv (12) || ciphertext (n) || tag (16)`.

use crate::error::{CryptoError, CryptoResult};
use crate::key::SessionKey;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;

/// Size of the GCM nonce in bytes.
pub const IV_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Smallest well-formed blob (empty plaintext).
pub const MIN_BLOB_SIZE: usize = IV_SIZE + TAG_SIZE;

/// Encrypts `plaintext` under `key` with a random IV and returns the blob.
pub fn seal(key: &SessionKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut iv = [0u8; IV_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    seal_with_iv(key, &iv, plaintext)
}

pub(crate) fn seal_with_iv(
    key: &SessionKey,
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    // aes-gcm appends the tag to the ciphertext
    let sealed = cipher
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|_| CryptoError::Encryption)?;

    let mut blob = Vec::with_capacity(IV_SIZE + sealed.len());
    blob.extend_from_slice(iv);
    blob.extend_from_slice(&sealed);
    Ok(blob)
}

/// Decrypts a blob produced by [`seal`].
pub fn open(key: &SessionKey, blob: &[u8]) -> CryptoResult<Vec<u8>> {
    if blob.len() < MIN_BLOB_SIZE {
        return Err(CryptoError::BlobTooShort {
            min: MIN_BLOB_SIZE,
            actual: blob.len(),
        });
    }

    let (iv, sealed) = blob.split_at(IV_SIZE);
    let cipher = Aes256Gcm::new(key.as_bytes().into());
    cipher
        .decrypt(Nonce::from_slice(iv), sealed)
        .map_err(|_| CryptoError::Decryption)
}
