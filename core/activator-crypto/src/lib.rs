//! Hybrid payload encryption for machine activation.
//!
//! A script is delivered to an untrusted client so that only the holder of
//! the matching RSA private key can read it:
//!
//! 1. A fresh 256-bit session script key (SSK) is drawn from the OS RNG.
//! 2. The payload is sealed with AES-256-GCM under the SSK into a blob laid
//!    out as `iv (12) || ciphertext (n) || tag (16)`.
//! 3. The SSK is wrapped with RSA-OAEP (SHA-256 digest and MGF1) under the
//!    client's public key.
//!
//! The SSK never leaves this crate unwrapped and is zeroized on drop. The
//! client side of the exchange ([`ClientKeyPair`], [`open_payload`]) lives
//! here too so both halves of the wire format are defined in one place.

mod asymmetric;
mod cipher;
mod envelope;
mod error;
mod key;

pub use asymmetric::{ClientKeyPair, ClientPublicKey, DEFAULT_CLIENT_KEY_BITS};
pub use cipher::{open, seal, IV_SIZE, MIN_BLOB_SIZE, TAG_SIZE};
pub use envelope::{open_payload, seal_payload, SealedPayload};
pub use error::{CryptoError, CryptoResult};
pub use key::{SessionKey, KEY_SIZE};
