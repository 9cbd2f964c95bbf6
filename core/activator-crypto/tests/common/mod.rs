//! Shared test helpers for crypto tests.

#![allow(dead_code)]

use activator_crypto::ClientKeyPair;
use std::sync::OnceLock;

/// A 2048-bit key pair generated once per test binary.
pub fn keypair() -> &'static ClientKeyPair {
    static KEYPAIR: OnceLock<ClientKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| ClientKeyPair::generate(2048).unwrap())
}

/// A second, unrelated 2048-bit key pair.
pub fn other_keypair() -> &'static ClientKeyPair {
    static KEYPAIR: OnceLock<ClientKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| ClientKeyPair::generate(2048).unwrap())
}

/// The public half of [`keypair`] as an `rsa` crate key.
pub fn rsa_public_key() -> rsa::RsaPublicKey {
    use rsa::pkcs8::DecodePublicKey;
    let pem = keypair().public_key().to_pem().unwrap();
    rsa::RsaPublicKey::from_public_key_pem(&pem).unwrap()
}
