//! RSA-OAEP key wrapping for session keys.
//!
//! Clients send their public key as base64 of either PEM or DER, in SPKI
//! (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`) form. OAEP uses SHA-256 for
//! both the label digest and MGF1.

use crate::error::{CryptoError, CryptoResult};
use crate::key::SessionKey;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// Modulus size used by [`ClientKeyPair::generate_default`].
pub const DEFAULT_CLIENT_KEY_BITS: usize = 4096;

const PEM_MARKER: &str = "-----BEGIN";

fn oaep() -> Oaep {
    Oaep::new::<Sha256>()
}

/// A client-supplied RSA public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPublicKey {
    inner: RsaPublicKey,
}

impl ClientPublicKey {
    /// Parses the `client_public_key` request field.
    ///
    /// The field is base64 of PEM or DER. Bare PEM text is accepted as well.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let encoded = encoded.trim();
        if encoded.starts_with(PEM_MARKER) {
            return Self::from_pem(encoded);
        }

        let raw = BASE64
            .decode(encoded)
            .map_err(|_| CryptoError::InvalidPublicKey)?;

        match std::str::from_utf8(&raw) {
            Ok(text) if text.contains(PEM_MARKER) => Self::from_pem(text),
            _ => Self::from_der(&raw),
        }
    }

    /// Parses an SPKI or PKCS#1 PEM document.
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        let pem = pem.trim();
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(|inner| Self { inner })
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Parses SPKI or PKCS#1 DER bytes.
    pub fn from_der(der: &[u8]) -> CryptoResult<Self> {
        RsaPublicKey::from_public_key_der(der)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(der))
            .map(|inner| Self { inner })
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Modulus size in bytes; also the length of every wrapped key.
    pub fn modulus_len(&self) -> usize {
        self.inner.size()
    }

    /// Encrypts the session key with RSA-OAEP.
    pub fn wrap(&self, key: &SessionKey) -> CryptoResult<Vec<u8>> {
        self.inner
            .encrypt(&mut rand::rngs::OsRng, oaep(), key.as_bytes())
            .map_err(|_| CryptoError::KeyWrap)
    }

    /// SPKI PEM encoding of this key.
    pub fn to_pem(&self) -> CryptoResult<String> {
        self.inner
            .to_public_key_pem(LineEnding::LF)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// The `client_public_key` wire form: base64 of the SPKI PEM.
    pub fn to_base64(&self) -> CryptoResult<String> {
        Ok(BASE64.encode(self.to_pem()?))
    }
}

/// The client half of the exchange: an RSA key pair whose public key is
/// sent with the activation request.
#[derive(Clone)]
pub struct ClientKeyPair {
    private: RsaPrivateKey,
}

impl ClientKeyPair {
    /// Generates a new key pair with a modulus of `bits`.
    pub fn generate(bits: usize) -> CryptoResult<Self> {
        let private = RsaPrivateKey::new(&mut rand::rngs::OsRng, bits)
            .map_err(|_| CryptoError::KeyGeneration)?;
        Ok(Self { private })
    }

    /// Generates a key pair of [`DEFAULT_CLIENT_KEY_BITS`].
    pub fn generate_default() -> CryptoResult<Self> {
        Self::generate(DEFAULT_CLIENT_KEY_BITS)
    }

    /// Loads a PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`) PEM.
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        let pem = pem.trim();
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map(|private| Self { private })
            .map_err(|_| CryptoError::InvalidPrivateKey)
    }

    /// PKCS#8 PEM encoding of the private key.
    pub fn to_pem(&self) -> CryptoResult<String> {
        self.private
            .to_pkcs8_pem(LineEnding::LF)
            .map(|pem| pem.to_string())
            .map_err(|_| CryptoError::InvalidPrivateKey)
    }

    pub fn public_key(&self) -> ClientPublicKey {
        ClientPublicKey {
            inner: self.private.to_public_key(),
        }
    }

    /// Decrypts a wrapped session key.
    pub fn unwrap_session_key(&self, wrapped: &[u8]) -> CryptoResult<SessionKey> {
        let raw = zeroize::Zeroizing::new(
            self.private
                .decrypt(oaep(), wrapped)
                .map_err(|_| CryptoError::KeyUnwrap)?,
        );
        SessionKey::from_slice(&raw)
    }
}

impl std::fmt::Debug for ClientKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientKeyPair")
            .field("bits", &(self.private.size() * 8))
            .field("private", &"[REDACTED]")
            .finish()
    }
}
