//! Persistence for install-session tokens, script metadata and activation
//! records.
//!
//! The [`TokenStore`] trait is the seam the activation orchestrator depends
//! on. [`SqliteTokenStore`] is the production implementation; its
//! [`TokenStore::conditional_activate`] performs the only state transition a
//! token ever makes, as one compare-and-set transaction.

mod error;
mod schema;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteTokenStore;

use activator_types::{ActivationRecord, InstallationToken, ScriptArtifact, ScriptId, TokenId};
use async_trait::async_trait;

/// Storage operations used by activation and by token issuance.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Looks a token up by its secret value.
    async fn get_by_value(&self, value: &str) -> StoreResult<Option<InstallationToken>>;

    /// Atomically moves the record's token from `UNUSED` to `ACTIVATED` and
    /// appends `record`.
    ///
    /// Returns `Ok(false)` without writing anything when the token was no
    /// longer `UNUSED`. Any error leaves the token untouched.
    async fn conditional_activate(&self, record: &ActivationRecord) -> StoreResult<bool>;

    /// Inserts a freshly issued token.
    async fn insert(&self, token: &InstallationToken) -> StoreResult<()>;

    /// Deletes a token and its activation records. Returns false if absent.
    async fn delete(&self, id: TokenId) -> StoreResult<bool>;

    /// All tokens, newest first.
    async fn list(&self) -> StoreResult<Vec<InstallationToken>>;

    /// Activation records for one token, oldest first.
    async fn activations(&self, token_id: TokenId) -> StoreResult<Vec<ActivationRecord>>;

    /// Registers script metadata.
    async fn insert_script(&self, script: &ScriptArtifact) -> StoreResult<()>;

    async fn get_script(&self, id: ScriptId) -> StoreResult<Option<ScriptArtifact>>;
}
