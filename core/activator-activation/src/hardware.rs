//! Hardware binding.
//!
//! Clients report an ordered list of hardware identifiers. Only a digest is
//! stored: the identifiers are joined with [`HARDWARE_ID_DELIMITER`] in the
//! order received and hashed with SHA-256. The deployed client always sends
//! the same identifiers in a fixed order, so reordering would break matching
//! against existing records.

use activator_types::{ActivationId, ActivationRecord, InstallationToken};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

pub const HARDWARE_ID_DELIMITER: &str = "|";

/// Lowercase hex SHA-256 of the joined identifiers (64 characters).
#[must_use]
pub fn hash_hardware_ids<S: AsRef<str>>(hardware_ids: &[S]) -> String {
    let mut hasher = Sha256::new();
    for (i, id) in hardware_ids.iter().enumerate() {
        if i > 0 {
            hasher.update(HARDWARE_ID_DELIMITER.as_bytes());
        }
        hasher.update(id.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Builds the audit row for activating `token` from this hardware.
#[must_use]
pub fn activation_record<S: AsRef<str>>(
    token: &InstallationToken,
    hardware_ids: &[S],
    platform_info: Option<&str>,
    now: DateTime<Utc>,
) -> ActivationRecord {
    ActivationRecord {
        id: ActivationId::new(),
        token_id: token.id,
        hardware_ids_hash: hash_hardware_ids(hardware_ids),
        platform_info: platform_info.unwrap_or_default().to_string(),
        created_at: now,
    }
}
