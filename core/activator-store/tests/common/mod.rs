//! Shared test helpers for store tests.

#![allow(dead_code)]

use activator_store::{SqliteTokenStore, TokenStore};
use activator_types::{
    ActivationId, ActivationRecord, ExecutionConfig, ExecutionMetadata, InstallationToken,
    PlatformKey, ScriptArtifact,
};
use chrono::{Duration, Utc};

pub fn sample_script() -> ScriptArtifact {
    ScriptArtifact::new(
        "setup",
        "scripts/1700000000000_setup.py",
        ExecutionConfig::new()
            .with(PlatformKey::Default, ExecutionMetadata::new("python3", ["-u"])),
    )
}

/// In-memory store with one script registered.
pub async fn store_with_script() -> (SqliteTokenStore, ScriptArtifact) {
    let store = SqliteTokenStore::open_in_memory().unwrap();
    let script = sample_script();
    store.insert_script(&script).await.unwrap();
    (store, script)
}

/// Inserts a fresh token expiring in one hour.
pub async fn insert_token(store: &SqliteTokenStore, script: &ScriptArtifact) -> InstallationToken {
    let token =
        InstallationToken::issue(script.id, "test customer", Some(Duration::hours(1))).unwrap();
    store.insert(&token).await.unwrap();
    token
}

pub fn record_for(token: &InstallationToken) -> ActivationRecord {
    ActivationRecord {
        id: ActivationId::new(),
        token_id: token.id,
        hardware_ids_hash: "ab".repeat(32),
        platform_info: "Linux x86_64".to_string(),
        created_at: Utc::now(),
    }
}
