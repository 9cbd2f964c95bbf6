//! Shared helpers for HTTP tests.

#![allow(dead_code)]

use activator_activation::Activator;
use activator_artifacts::MemoryScriptStore;
use activator_crypto::ClientKeyPair;
use activator_server::{build_router, AppState};
use activator_store::{SqliteTokenStore, TokenStore};
use activator_types::{
    ExecutionConfig, ExecutionMetadata, InstallationToken, PlatformKey, ScriptArtifact,
};
use chrono::Duration;
use std::sync::{Arc, OnceLock};

pub const SCRIPT_PATH: &str = "scripts/hello.sh";
pub const LAUNCHER_DIR: &str = "bin/launchers";

pub fn keypair() -> &'static ClientKeyPair {
    static KEYPAIR: OnceLock<ClientKeyPair> = OnceLock::new();
    KEYPAIR.get_or_init(|| ClientKeyPair::generate(2048).unwrap())
}

pub fn hardware_ids() -> Vec<String> {
    vec!["UUID-1".into(), "SERIAL-2".into(), "Acme".into(), "Model 7".into(), "DISK-5".into()]
}

pub struct TestServer {
    pub base: String,
    pub tokens: Arc<SqliteTokenStore>,
    pub scripts: Arc<MemoryScriptStore>,
    pub script: ScriptArtifact,
}

impl TestServer {
    /// Inserts an unused token with the given lifetime.
    pub async fn token_with_ttl(&self, ttl: Duration) -> InstallationToken {
        let token = InstallationToken::issue(self.script.id, "http test", Some(ttl)).unwrap();
        self.tokens.insert(&token).await.unwrap();
        token
    }

    pub async fn token(&self) -> InstallationToken {
        self.token_with_ttl(Duration::hours(1)).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Spin up the HTTP server on an OS-assigned port.
pub async fn spawn_test_server() -> TestServer {
    let tokens = Arc::new(SqliteTokenStore::open_in_memory().unwrap());
    let scripts = Arc::new(MemoryScriptStore::new());

    let config = ExecutionConfig::new()
        .with(PlatformKey::Linux, ExecutionMetadata::new("bash", Vec::<String>::new()))
        .with(PlatformKey::Default, ExecutionMetadata::new("sh", ["-e"]));
    let script = ScriptArtifact::new("hello", SCRIPT_PATH, config);
    tokens.insert_script(&script).await.unwrap();
    scripts.put(SCRIPT_PATH, "echo hi").await;

    let activator = Activator::new(tokens.clone(), scripts.clone());
    let app = build_router(AppState::new(activator, LAUNCHER_DIR));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://127.0.0.1:{}", port),
        tokens,
        scripts,
        script,
    }
}
