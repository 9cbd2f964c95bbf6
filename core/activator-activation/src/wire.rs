//! Request and response bodies of the activation endpoint.

use activator_crypto::{CryptoResult, SealedPayload};
use activator_types::ExecutionMetadata;
use serde::{Deserialize, Serialize};

/// Value of [`ActivationResponse::status`] on success.
pub const STATUS_SUCCESS: &str = "success";

/// Body of `POST /activate-machine`.
///
/// Missing fields deserialize as empty so that validation, not the JSON
/// layer, reports which parameters are absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRequest {
    #[serde(default)]
    pub install_session_token: String,
    #[serde(default)]
    pub hardware_ids: Vec<String>,
    /// Base64 of a PEM or DER RSA public key.
    #[serde(default)]
    pub client_public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_info: Option<String>,
}

impl ActivationRequest {
    /// Names of required fields that are absent or empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.install_session_token.is_empty() {
            missing.push("install_session_token");
        }
        if self.hardware_ids.is_empty() {
            missing.push("hardware_ids");
        }
        if self.client_public_key.is_empty() {
            missing.push("client_public_key");
        }
        missing
    }

    /// The platform report, with an empty string treated as absent.
    #[must_use]
    pub fn platform_info(&self) -> Option<&str> {
        self.platform_info.as_deref().filter(|s| !s.is_empty())
    }
}

impl std::fmt::Debug for ActivationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.install_session_token.chars().take(6).collect();
        f.debug_struct("ActivationRequest")
            .field("install_session_token", &format!("{prefix}…"))
            .field("hardware_ids", &self.hardware_ids.len())
            .field("client_public_key_len", &self.client_public_key.len())
            .field("platform_info", &self.platform_info)
            .finish()
    }
}

/// Successful activation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationResponse {
    /// Base64 RSA-OAEP wrapped session key.
    pub encrypted_session_script_key: String,
    /// Base64 `iv || ciphertext || tag`.
    pub encrypted_script_blob: String,
    pub script_execution_metadata: ExecutionMetadata,
    pub status: String,
}

impl ActivationResponse {
    pub(crate) fn new(sealed: &SealedPayload, metadata: ExecutionMetadata) -> Self {
        Self {
            encrypted_session_script_key: sealed.encrypted_session_script_key(),
            encrypted_script_blob: sealed.encrypted_script_blob(),
            script_execution_metadata: metadata,
            status: STATUS_SUCCESS.to_string(),
        }
    }

    /// Decodes the two crypto fields for opening on the client.
    pub fn sealed_payload(&self) -> CryptoResult<SealedPayload> {
        SealedPayload::from_base64(&self.encrypted_session_script_key, &self.encrypted_script_blob)
    }
}
