//! Script content providers.
//!
//! Script bytes live outside the database, addressed by an opaque path. The
//! [`ScriptStore`] trait is all the activation flow needs: fetch bytes, and
//! check existence. [`GitHubScriptStore`] reads from a GitHub repository via
//! the contents API; [`MemoryScriptStore`] backs tests and local runs.

mod error;
mod github;
mod memory;

pub use error::{ArtifactError, ArtifactResult};
pub use github::{GitHubConfig, GitHubScriptStore};
pub use memory::MemoryScriptStore;

use async_trait::async_trait;

/// Read-only access to script content by path.
#[async_trait]
pub trait ScriptStore: Send + Sync {
    /// Returns the name of the provider, for logs.
    fn provider_name(&self) -> &'static str;

    /// Fetches the raw bytes stored at `path`.
    async fn get_content(&self, path: &str) -> ArtifactResult<Vec<u8>>;

    /// Returns whether anything is stored at `path`.
    async fn exists(&self, path: &str) -> ArtifactResult<bool>;
}
