//! SQLite implementation of [`TokenStore`].
//!
//! A single connection sits behind a mutex; every call runs on the blocking
//! pool so the async executor never waits on disk I/O. The token status
//! transition is a conditional `UPDATE ... WHERE status = 'UNUSED'` inside an
//! immediate transaction, so concurrent activations of one token serialize
//! at the database rather than in application code.

use crate::error::{StoreError, StoreResult};
use crate::schema::SCHEMA;
use crate::TokenStore;
use activator_types::{
    ActivationId, ActivationRecord, ExecutionConfig, InstallationToken, ScriptArtifact, ScriptId,
    TokenId, TokenStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

const TOKEN_COLUMNS: &str =
    "id, token_value, script_id, customer_info, status, expires_at, created_at";

/// Token store backed by a SQLite database file.
#[derive(Clone)]
pub struct SqliteTokenStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTokenStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Open(format!("{}: {e}", path.display())))?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| StoreError::Open(format!("failed to set busy timeout: {e}")))?;
        info!("Opened token store at {}", path.display());
        Self::init(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Open(format!("in-memory store: {e}")))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Open(format!("failed to init schema: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn run<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn get_by_value(&self, value: &str) -> StoreResult<Option<InstallationToken>> {
        let value = value.to_string();
        self.run(move |conn| select_token_by_value(conn, &value)).await
    }

    async fn conditional_activate(&self, record: &ActivationRecord) -> StoreResult<bool> {
        let record = record.clone();
        self.run(move |conn| activate(conn, &record)).await
    }

    async fn insert(&self, token: &InstallationToken) -> StoreResult<()> {
        let token = token.clone();
        self.run(move |conn| insert_token(conn, &token)).await
    }

    async fn delete(&self, id: TokenId) -> StoreResult<bool> {
        self.run(move |conn| delete_token(conn, id)).await
    }

    async fn list(&self) -> StoreResult<Vec<InstallationToken>> {
        self.run(|conn| list_tokens(conn)).await
    }

    async fn activations(&self, token_id: TokenId) -> StoreResult<Vec<ActivationRecord>> {
        self.run(move |conn| list_activations(conn, token_id)).await
    }

    async fn insert_script(&self, script: &ScriptArtifact) -> StoreResult<()> {
        let script = script.clone();
        self.run(move |conn| insert_script(conn, &script)).await
    }

    async fn get_script(&self, id: ScriptId) -> StoreResult<Option<ScriptArtifact>> {
        self.run(move |conn| select_script(conn, id)).await
    }
}

// ── Tokens ───────────────────────────────────────────────────────

struct TokenRow {
    id: String,
    value: String,
    script_id: String,
    customer_info: String,
    status: String,
    expires_at: String,
    created_at: String,
}

impl TokenRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            value: row.get(1)?,
            script_id: row.get(2)?,
            customer_info: row.get(3)?,
            status: row.get(4)?,
            expires_at: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn into_token(self) -> StoreResult<InstallationToken> {
        Ok(InstallationToken {
            id: TokenId::parse(&self.id)
                .map_err(|e| StoreError::Corrupt(format!("invalid token id: {e}")))?,
            value: self.value,
            script_id: ScriptId::parse(&self.script_id)
                .map_err(|e| StoreError::Corrupt(format!("invalid script id: {e}")))?,
            customer_info: self.customer_info,
            status: self
                .status
                .parse::<TokenStatus>()
                .map_err(|e| StoreError::Corrupt(e.to_string()))?,
            expires_at: parse_timestamp(&self.expires_at, "expires_at")?,
            created_at: parse_timestamp(&self.created_at, "created_at")?,
        })
    }
}

fn select_token_by_value(conn: &Connection, value: &str) -> StoreResult<Option<InstallationToken>> {
    let row = conn
        .query_row(
            &format!("SELECT {TOKEN_COLUMNS} FROM install_tokens WHERE token_value = ?1"),
            params![value],
            TokenRow::read,
        )
        .optional()
        .map_err(|e| StoreError::Storage(format!("failed to load token: {e}")))?;
    row.map(TokenRow::into_token).transpose()
}

fn insert_token(conn: &Connection, token: &InstallationToken) -> StoreResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO install_tokens ({TOKEN_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        ),
        params![
            token.id.to_string(),
            token.value,
            token.script_id.to_string(),
            token.customer_info,
            token.status.as_str(),
            format_timestamp(&token.expires_at),
            format_timestamp(&token.created_at),
        ],
    )
    .map_err(|e| StoreError::Storage(format!("failed to insert token: {e}")))?;
    debug!("Inserted token {} for script {}", token.redacted_value(), token.script_id);
    Ok(())
}

fn delete_token(conn: &mut Connection, id: TokenId) -> StoreResult<bool> {
    let tx = conn
        .transaction()
        .map_err(|e| StoreError::Storage(format!("failed to begin delete: {e}")))?;
    tx.execute(
        "DELETE FROM activations WHERE token_id = ?1",
        params![id.to_string()],
    )
    .map_err(|e| StoreError::Storage(format!("failed to delete activations: {e}")))?;
    let deleted = tx
        .execute("DELETE FROM install_tokens WHERE id = ?1", params![id.to_string()])
        .map_err(|e| StoreError::Storage(format!("failed to delete token: {e}")))?;
    tx.commit()
        .map_err(|e| StoreError::Storage(format!("failed to commit delete: {e}")))?;
    Ok(deleted > 0)
}

fn list_tokens(conn: &Connection) -> StoreResult<Vec<InstallationToken>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {TOKEN_COLUMNS} FROM install_tokens ORDER BY created_at DESC"
        ))
        .map_err(|e| StoreError::Storage(format!("failed to prepare token query: {e}")))?;
    let rows = stmt
        .query_map([], TokenRow::read)
        .map_err(|e| StoreError::Storage(format!("failed to query tokens: {e}")))?;

    let mut result = Vec::new();
    for row in rows {
        let row = row.map_err(|e| StoreError::Storage(format!("failed to read token row: {e}")))?;
        result.push(row.into_token()?);
    }
    Ok(result)
}

// ── Activation ───────────────────────────────────────────────────

fn activate(conn: &mut Connection, record: &ActivationRecord) -> StoreResult<bool> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| StoreError::Storage(format!("failed to begin activation: {e}")))?;

    let updated = tx
        .execute(
            "UPDATE install_tokens SET status = ?1 WHERE id = ?2 AND status = ?3",
            params![
                TokenStatus::Activated.as_str(),
                record.token_id.to_string(),
                TokenStatus::Unused.as_str(),
            ],
        )
        .map_err(|e| StoreError::Storage(format!("failed to update token status: {e}")))?;

    if updated == 0 {
        // No row matched, so dropping tx discards an empty write set.
        debug!("Token {} was no longer unused", record.token_id);
        return Ok(false);
    }

    tx.execute(
        "INSERT INTO activations (id, token_id, hardware_ids_hash, platform_info, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            record.id.to_string(),
            record.token_id.to_string(),
            record.hardware_ids_hash,
            record.platform_info,
            format_timestamp(&record.created_at),
        ],
    )
    .map_err(|e| StoreError::Storage(format!("failed to insert activation record: {e}")))?;

    tx.commit()
        .map_err(|e| StoreError::Storage(format!("failed to commit activation: {e}")))?;
    Ok(true)
}

fn list_activations(conn: &Connection, token_id: TokenId) -> StoreResult<Vec<ActivationRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, token_id, hardware_ids_hash, platform_info, created_at \
             FROM activations WHERE token_id = ?1 ORDER BY created_at ASC",
        )
        .map_err(|e| StoreError::Storage(format!("failed to prepare activation query: {e}")))?;
    let rows = stmt
        .query_map(params![token_id.to_string()], |row| {
            let id: String = row.get(0)?;
            let token_id: String = row.get(1)?;
            let hash: String = row.get(2)?;
            let platform: String = row.get(3)?;
            let created_at: String = row.get(4)?;
            Ok((id, token_id, hash, platform, created_at))
        })
        .map_err(|e| StoreError::Storage(format!("failed to query activations: {e}")))?;

    let mut result = Vec::new();
    for row in rows {
        let (id, token_id, hardware_ids_hash, platform_info, created_at) =
            row.map_err(|e| StoreError::Storage(format!("failed to read activation row: {e}")))?;
        result.push(ActivationRecord {
            id: ActivationId::parse(&id)
                .map_err(|e| StoreError::Corrupt(format!("invalid activation id: {e}")))?,
            token_id: TokenId::parse(&token_id)
                .map_err(|e| StoreError::Corrupt(format!("invalid token id: {e}")))?,
            hardware_ids_hash,
            platform_info,
            created_at: parse_timestamp(&created_at, "created_at")?,
        });
    }
    Ok(result)
}

// ── Scripts ──────────────────────────────────────────────────────

fn insert_script(conn: &Connection, script: &ScriptArtifact) -> StoreResult<()> {
    let config = script
        .execution_config
        .to_json()
        .map_err(|e| StoreError::Storage(format!("failed to encode execution config: {e}")))?;
    conn.execute(
        "INSERT INTO scripts (id, name, content_path, execution_config, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            script.id.to_string(),
            script.name,
            script.content_path,
            config,
            format_timestamp(&script.created_at),
        ],
    )
    .map_err(|e| StoreError::Storage(format!("failed to insert script: {e}")))?;
    Ok(())
}

fn select_script(conn: &Connection, id: ScriptId) -> StoreResult<Option<ScriptArtifact>> {
    let row = conn
        .query_row(
            "SELECT name, content_path, execution_config, created_at FROM scripts WHERE id = ?1",
            params![id.to_string()],
            |row| {
                let name: String = row.get(0)?;
                let content_path: String = row.get(1)?;
                let config: String = row.get(2)?;
                let created_at: String = row.get(3)?;
                Ok((name, content_path, config, created_at))
            },
        )
        .optional()
        .map_err(|e| StoreError::Storage(format!("failed to load script: {e}")))?;

    let Some((name, content_path, config, created_at)) = row else {
        return Ok(None);
    };

    Ok(Some(ScriptArtifact {
        id,
        name,
        content_path,
        execution_config: ExecutionConfig::from_json(&config)
            .map_err(|e| StoreError::Corrupt(format!("invalid execution config: {e}")))?,
        created_at: parse_timestamp(&created_at, "created_at")?,
    }))
}

// ── Timestamps ───────────────────────────────────────────────────

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(s: &str, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid {column}: {e}")))
}
