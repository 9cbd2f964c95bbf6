//! The activation flow.

use crate::clock::{Clock, SystemClock};
use crate::error::{ActivationError, ActivationResult};
use crate::hardware::activation_record;
use crate::platform::resolve_metadata;
use crate::wire::{ActivationRequest, ActivationResponse};
use activator_artifacts::{ArtifactError, ScriptStore};
use activator_crypto::{seal_payload, ClientPublicKey};
use activator_store::TokenStore;
use activator_types::{InstallationToken, TokenStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default bound on fetching script content.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Drives one activation from token check to committed record.
///
/// Nothing is written unless every step up to and including the commit
/// succeeds, and the sealed payload is only handed out after the commit.
#[derive(Clone)]
pub struct Activator {
    tokens: Arc<dyn TokenStore>,
    scripts: Arc<dyn ScriptStore>,
    clock: Arc<dyn Clock>,
    fetch_timeout: Duration,
}

impl Activator {
    pub fn new(tokens: Arc<dyn TokenStore>, scripts: Arc<dyn ScriptStore>) -> Self {
        Self {
            tokens,
            scripts,
            clock: Arc::new(SystemClock),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn scripts(&self) -> &Arc<dyn ScriptStore> {
        &self.scripts
    }

    /// Activates a machine with a one-time token.
    pub async fn activate(
        &self,
        request: &ActivationRequest,
    ) -> ActivationResult<ActivationResponse> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(ActivationError::MissingParameters(missing.join(", ")));
        }

        let token = self.usable_token(&request.install_session_token).await?;
        let redacted = token.redacted_value();

        let script = self
            .tokens
            .get_script(token.script_id)
            .await?
            .ok_or_else(|| {
                ActivationError::Internal(format!(
                    "script {} referenced by token is missing",
                    token.script_id
                ))
            })?;

        let recipient = ClientPublicKey::from_base64(&request.client_public_key).inspect_err(|e| {
            warn!("Rejected client key for token {}: {}", redacted, e);
        })?;

        let content = self.fetch_content(&script.content_path).await?;
        debug!("Fetched {} bytes for script {}", content.len(), script.id);

        let sealed = seal_payload(&recipient, &content)?;
        drop(content);

        let platform_info = request.platform_info();
        let record =
            activation_record(&token, &request.hardware_ids, platform_info, self.clock.now());
        let metadata = resolve_metadata(&script.execution_config, platform_info);

        if !self.tokens.conditional_activate(&record).await? {
            warn!("Token {} was activated concurrently", redacted);
            return Err(ActivationError::TokenAlreadyUsed);
        }

        info!(
            "Activated token {} for script {} (platform: {})",
            redacted,
            script.id,
            platform_info.unwrap_or("unknown")
        );
        Ok(ActivationResponse::new(&sealed, metadata))
    }

    /// Looks the token up and checks that it can still be activated.
    async fn usable_token(&self, value: &str) -> ActivationResult<InstallationToken> {
        let token = self
            .tokens
            .get_by_value(value)
            .await?
            .ok_or(ActivationError::TokenNotFound)?;

        if token.status != TokenStatus::Unused {
            debug!("Token {} already {}", token.redacted_value(), token.status);
            return Err(ActivationError::TokenAlreadyUsed);
        }
        if token.is_expired_at(self.clock.now()) {
            debug!("Token {} expired at {}", token.redacted_value(), token.expires_at);
            return Err(ActivationError::TokenExpired);
        }
        Ok(token)
    }

    async fn fetch_content(&self, path: &str) -> ActivationResult<Vec<u8>> {
        let fetch = self.scripts.get_content(path);
        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(content)) => Ok(content),
            Ok(Err(ArtifactError::NotFound(_))) => Err(ActivationError::Internal(format!(
                "script content missing from {}",
                self.scripts.provider_name()
            ))),
            Ok(Err(e)) => {
                warn!(
                    "Fetching script content from {} failed: {}",
                    self.scripts.provider_name(),
                    e
                );
                Err(ActivationError::UpstreamFetch(e.to_string()))
            }
            Err(_) => {
                warn!(
                    "Fetching script content from {} timed out after {:?}",
                    self.scripts.provider_name(),
                    self.fetch_timeout
                );
                Err(ActivationError::UpstreamFetch("timed out".to_string()))
            }
        }
    }
}
