//! Activation audit records.

use crate::ids::{ActivationId, TokenId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only audit row written in the same transaction that activates a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRecord {
    pub id: ActivationId,
    pub token_id: TokenId,
    /// Lowercase hex SHA-256 of the joined hardware identifiers.
    pub hardware_ids_hash: String,
    /// Platform string as reported by the client, empty when absent.
    pub platform_info: String,
    pub created_at: DateTime<Utc>,
}
