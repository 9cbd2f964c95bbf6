//! Shared test helpers for activation tests.

#![allow(dead_code)]

use activator_activation::{ActivationRequest, Activator};
use activator_artifacts::{ArtifactError, ArtifactResult, MemoryScriptStore, ScriptStore};
use activator_crypto::ClientKeyPair;
use activator_store::{SqliteTokenStore, StoreError, StoreResult, TokenStore};
use activator_types::{
    ActivationRecord, ExecutionConfig, ExecutionMetadata, InstallationToken, PlatformKey,
    ScriptArtifact, ScriptId, TokenId,
};
use async_trait::async_trait;
use chrono::Duration;
use std::sync::{Arc, OnceLock};

pub const SCRIPT_PATH: &str = "scripts/1700000000000_hello.sh";

pub fn hardware_ids() -> Vec<String> {
    ["UUID-1", "SERIAL-2", "Dell Inc.", "XPS 13", "DISK-5"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Shared 2048-bit client key pair; generation is slow in debug builds.
pub fn keypair() -> &'static ClientKeyPair {
    static KEYPAIR: OnceLock<ClientKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| ClientKeyPair::generate(2048).unwrap())
}

pub fn client_public_key() -> String {
    keypair().public_key().to_base64().unwrap()
}

pub fn default_config() -> ExecutionConfig {
    ExecutionConfig::new().with(PlatformKey::Default, ExecutionMetadata::new("sh", ["-e"]))
}

pub struct Fixture {
    pub tokens: Arc<SqliteTokenStore>,
    pub scripts: Arc<MemoryScriptStore>,
    pub script: ScriptArtifact,
    pub token: InstallationToken,
}

impl Fixture {
    pub fn activator(&self) -> Activator {
        Activator::new(self.tokens.clone(), self.scripts.clone())
    }

    pub fn request(&self) -> ActivationRequest {
        ActivationRequest {
            install_session_token: self.token.value.clone(),
            hardware_ids: hardware_ids(),
            client_public_key: client_public_key(),
            platform_info: Some("linux-amd64,SysInfoSpec=V1.1".to_string()),
        }
    }

    pub async fn stored_token(&self) -> InstallationToken {
        self.tokens.get_by_value(&self.token.value).await.unwrap().unwrap()
    }

    pub async fn records(&self) -> Vec<ActivationRecord> {
        self.tokens.activations(self.token.id).await.unwrap()
    }
}

/// One script with `content`, one unused token expiring in an hour.
pub async fn fixture_with(content: &[u8], config: ExecutionConfig) -> Fixture {
    let tokens = Arc::new(SqliteTokenStore::open_in_memory().unwrap());
    let scripts = Arc::new(MemoryScriptStore::new());

    let script = ScriptArtifact::new("hello", SCRIPT_PATH, config);
    tokens.insert_script(&script).await.unwrap();
    scripts.put(SCRIPT_PATH, content.to_vec()).await;

    let token = InstallationToken::issue(script.id, "acme corp", Some(Duration::hours(1))).unwrap();
    tokens.insert(&token).await.unwrap();

    Fixture { tokens, scripts, script, token }
}

pub async fn fixture() -> Fixture {
    fixture_with(b"echo hi", default_config()).await
}

/// Token store wrapper that injects failures.
pub struct FaultyTokenStore {
    pub inner: Arc<SqliteTokenStore>,
    pub fail_commit: bool,
    pub hide_scripts: bool,
}

#[async_trait]
impl TokenStore for FaultyTokenStore {
    async fn get_by_value(&self, value: &str) -> StoreResult<Option<InstallationToken>> {
        self.inner.get_by_value(value).await
    }

    async fn conditional_activate(&self, record: &ActivationRecord) -> StoreResult<bool> {
        if self.fail_commit {
            return Err(StoreError::Storage("disk I/O error".to_string()));
        }
        self.inner.conditional_activate(record).await
    }

    async fn insert(&self, token: &InstallationToken) -> StoreResult<()> {
        self.inner.insert(token).await
    }

    async fn delete(&self, id: TokenId) -> StoreResult<bool> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> StoreResult<Vec<InstallationToken>> {
        self.inner.list().await
    }

    async fn activations(&self, token_id: TokenId) -> StoreResult<Vec<ActivationRecord>> {
        self.inner.activations(token_id).await
    }

    async fn insert_script(&self, script: &ScriptArtifact) -> StoreResult<()> {
        self.inner.insert_script(script).await
    }

    async fn get_script(&self, id: ScriptId) -> StoreResult<Option<ScriptArtifact>> {
        if self.hide_scripts {
            return Ok(None);
        }
        self.inner.get_script(id).await
    }
}

/// Script store that never answers in time.
pub struct StalledScriptStore;

#[async_trait]
impl ScriptStore for StalledScriptStore {
    fn provider_name(&self) -> &'static str {
        "stalled"
    }

    async fn get_content(&self, _path: &str) -> ArtifactResult<Vec<u8>> {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn exists(&self, _path: &str) -> ArtifactResult<bool> {
        Ok(true)
    }
}

/// Script store that is unreachable.
pub struct UnreachableScriptStore;

#[async_trait]
impl ScriptStore for UnreachableScriptStore {
    fn provider_name(&self) -> &'static str {
        "unreachable"
    }

    async fn get_content(&self, _path: &str) -> ArtifactResult<Vec<u8>> {
        Err(ArtifactError::Network("connection refused".to_string()))
    }

    async fn exists(&self, _path: &str) -> ArtifactResult<bool> {
        Err(ArtifactError::Network("connection refused".to_string()))
    }
}
