//! In-memory content provider.

use crate::error::{ArtifactError, ArtifactResult};
use crate::ScriptStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Content provider holding scripts in a map. Used in tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryScriptStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryScriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `content` at `path`, replacing anything already there.
    pub async fn put(&self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.write().await.insert(path.into(), content.into());
    }

    pub async fn remove(&self, path: &str) -> bool {
        self.files.write().await.remove(path).is_some()
    }
}

#[async_trait]
impl ScriptStore for MemoryScriptStore {
    fn provider_name(&self) -> &'static str {
        "memory"
    }

    async fn get_content(&self, path: &str) -> ArtifactResult<Vec<u8>> {
        self.files
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| ArtifactError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> ArtifactResult<bool> {
        Ok(self.files.read().await.contains_key(path))
    }
}
