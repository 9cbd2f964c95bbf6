//! SQLite schema.

/// Status values are constrained so an `EXPIRED` row can never be written.
pub(crate) const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS scripts (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        content_path TEXT NOT NULL,
        execution_config TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS install_tokens (
        id TEXT PRIMARY KEY,
        token_value TEXT NOT NULL UNIQUE,
        script_id TEXT NOT NULL REFERENCES scripts(id),
        customer_info TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL CHECK (status IN ('UNUSED', 'ACTIVATED')),
        expires_at TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS activations (
        id TEXT PRIMARY KEY,
        token_id TEXT NOT NULL REFERENCES install_tokens(id),
        hardware_ids_hash TEXT NOT NULL,
        platform_info TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_activations_token ON activations(token_id);
";
