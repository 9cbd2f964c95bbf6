//! Client for the activation endpoint.
//!
//! Generates nothing on its own: the caller supplies the key pair whose
//! public half is sent, and receives the opened script back.

use activator_activation::{ActivationRequest, ActivationResponse};
use activator_crypto::{open_payload, ClientKeyPair, CryptoError};
use activator_types::ExecutionMetadata;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors returned by [`ActivationClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("activation rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// A decrypted script and how to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredScript {
    pub content: Vec<u8>,
    pub metadata: ExecutionMetadata,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct ActivationClient {
    base_url: String,
    client: Client,
}

impl ActivationClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ClientError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Sends one activation request.
    pub async fn activate(&self, request: &ActivationRequest) -> ClientResult<ActivationResponse> {
        let url = format!("{}/api/activate-machine", self.base_url);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_default();
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Http(format!("invalid response body: {e}")))
    }

    /// Activates with `keypair`'s public key and opens the delivered script.
    pub async fn activate_and_open(
        &self,
        keypair: &ClientKeyPair,
        install_session_token: &str,
        hardware_ids: Vec<String>,
        platform_info: Option<String>,
    ) -> ClientResult<DeliveredScript> {
        let request = ActivationRequest {
            install_session_token: install_session_token.to_string(),
            hardware_ids,
            client_public_key: keypair.public_key().to_base64()?,
            platform_info,
        };
        let response = self.activate(&request).await?;
        let sealed = response.sealed_payload()?;
        let content = open_payload(keypair, &sealed)?;

        Ok(DeliveredScript {
            content,
            metadata: response.script_execution_metadata,
        })
    }
}
