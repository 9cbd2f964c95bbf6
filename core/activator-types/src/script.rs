//! Script artifacts and their execution configuration.

use crate::ids::ScriptId;
use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Platform keys an execution config may be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKey {
    Windows,
    Linux,
    Darwin,
    Default,
}

impl PlatformKey {
    pub const ALL: [PlatformKey; 4] = [Self::Windows, Self::Linux, Self::Darwin, Self::Default];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::InvalidPlatform(s.to_string()))
    }
}

/// How a client should run a decrypted script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    #[serde(default)]
    pub interpreter: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExecutionMetadata {
    #[must_use]
    pub fn new(
        interpreter: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The `{interpreter: "", args: []}` value returned when nothing matches.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interpreter.is_empty() && self.args.is_empty()
    }
}

/// Per-platform execution metadata for one script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionConfig(BTreeMap<PlatformKey, ExecutionMetadata>);

impl ExecutionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: PlatformKey, meta: ExecutionMetadata) -> Self {
        self.0.insert(key, meta);
        self
    }

    pub fn insert(
        &mut self,
        key: PlatformKey,
        meta: ExecutionMetadata,
    ) -> Option<ExecutionMetadata> {
        self.0.insert(key, meta)
    }

    #[must_use]
    pub fn get(&self, key: PlatformKey) -> Option<&ExecutionMetadata> {
        self.0.get(&key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a config from its stored JSON object form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<(PlatformKey, ExecutionMetadata)> for ExecutionConfig {
    fn from_iter<I: IntoIterator<Item = (PlatformKey, ExecutionMetadata)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Metadata of a script whose bytes live in the external artifact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptArtifact {
    pub id: ScriptId,
    pub name: String,
    /// Opaque path of the content inside the artifact store.
    pub content_path: String,
    pub execution_config: ExecutionConfig,
    pub created_at: DateTime<Utc>,
}

impl ScriptArtifact {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_path: impl Into<String>,
        execution_config: ExecutionConfig,
    ) -> Self {
        Self {
            id: ScriptId::new(),
            name: name.into(),
            content_path: content_path.into(),
            execution_config,
            created_at: Utc::now(),
        }
    }
}
