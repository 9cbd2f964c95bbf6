//! Install-session tokens.
//!
//! A token is a one-time credential tying an activation attempt to a script.
//! The stored status only ever moves `Unused -> Activated`. Expiry is never
//! written back; it is computed against the clock whenever it matters.

use crate::ids::{ScriptId, TokenId};
use crate::Error;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of random bytes in a freshly issued token value (hex-encoded to 32 chars).
pub const TOKEN_VALUE_BYTES: usize = 16;

/// Lifetime applied by [`InstallationToken::issue`] when none is given.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Persisted token status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    /// Issued and not yet redeemed.
    Unused,
    /// Redeemed by exactly one activation.
    Activated,
}

impl TokenStatus {
    /// The string stored in the database and shown to admins.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unused => "UNUSED",
            Self::Activated => "ACTIVATED",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNUSED" => Ok(Self::Unused),
            "ACTIVATED" => Ok(Self::Activated),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Point-in-time view of a token, including the derived `Expired` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectiveStatus {
    Unused,
    Activated,
    Expired,
}

/// A one-time install-session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationToken {
    pub id: TokenId,
    /// The opaque secret handed to the customer.
    pub value: String,
    pub script_id: ScriptId,
    /// Free-text customer or usage note.
    pub customer_info: String,
    pub status: TokenStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl InstallationToken {
    /// Issues a fresh, unused token for `script_id` with a random value.
    ///
    /// `ttl` defaults to [`DEFAULT_TOKEN_TTL_HOURS`]. Fails with
    /// [`Error::InvalidTtl`] if the expiry would not be a representable
    /// timestamp.
    pub fn issue(
        script_id: ScriptId,
        customer_info: impl Into<String>,
        ttl: Option<Duration>,
    ) -> crate::Result<Self> {
        let ttl = match ttl {
            Some(ttl) => ttl,
            None => Duration::try_hours(DEFAULT_TOKEN_TTL_HOURS).ok_or_else(|| {
                Error::InvalidTtl(format!("{DEFAULT_TOKEN_TTL_HOURS} hours"))
            })?,
        };
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::InvalidTtl(format!("{ttl} is out of range")))?;

        let mut bytes = [0u8; TOKEN_VALUE_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);

        Ok(Self {
            id: TokenId::new(),
            value: hex::encode(bytes),
            script_id,
            customer_info: customer_info.into(),
            status: TokenStatus::Unused,
            expires_at,
            created_at: now,
        })
    }

    /// Returns true if the token's expiry lies strictly before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Status as an admin would see it at `now`.
    ///
    /// An activated token stays `Activated` even after its expiry passes.
    #[must_use]
    pub fn effective_status(&self, now: DateTime<Utc>) -> EffectiveStatus {
        match self.status {
            TokenStatus::Activated => EffectiveStatus::Activated,
            TokenStatus::Unused if self.is_expired_at(now) => EffectiveStatus::Expired,
            TokenStatus::Unused => EffectiveStatus::Unused,
        }
    }

    /// Short, non-secret prefix of the token value for log lines.
    #[must_use]
    pub fn redacted_value(&self) -> String {
        redact(&self.value)
    }
}

/// Returns the first few characters of a secret followed by an ellipsis.
pub(crate) fn redact(value: &str) -> String {
    let prefix: String = value.chars().take(6).collect();
    format!("{prefix}…")
}
