//! GitHub repository content provider.
//!
//! Uses the REST contents API (`GET /repos/{owner}/{repo}/contents/{path}`).
//! Small files come back inline as base64; files over the inline limit are
//! re-requested with the raw media type.

use crate::error::{ArtifactError, ArtifactResult};
use crate::ScriptStore;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("activator/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a GitHub-hosted artifact repository.
#[derive(Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token; required for private repositories.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Branch, tag or commit to read from. Repository default when unset.
    #[serde(default)]
    pub git_ref: Option<String>,
    /// Base URL for the REST API (e.g. `https://api.github.com`).
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: None,
            git_ref: None,
            api_base_url: "https://api.github.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("git_ref", &self.git_ref)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

/// Reads script content from a GitHub repository.
pub struct GitHubScriptStore {
    config: GitHubConfig,
    client: Client,
}

impl GitHubScriptStore {
    /// Creates a new provider. The HTTP client enforces `config.timeout_secs`.
    pub fn new(config: GitHubConfig) -> ArtifactResult<Self> {
        if config.owner.is_empty() || config.repo.is_empty() {
            return Err(ArtifactError::Config(
                "owner and repo must be set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ArtifactError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn contents_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            encoded.join("/")
        )
    }

    fn request(&self, path: &str, media_type: &str) -> RequestBuilder {
        let mut request = self
            .client
            .get(self.contents_url(path))
            .header(ACCEPT, media_type)
            .header("X-GitHub-Api-Version", API_VERSION);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        if let Some(git_ref) = &self.config.git_ref {
            request = request.query(&[("ref", git_ref.as_str())]);
        }
        request
    }

    async fn send(&self, path: &str, media_type: &str) -> ArtifactResult<reqwest::Response> {
        let response = self
            .request(path, media_type)
            .send()
            .await
            .map_err(ArtifactError::from_reqwest)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ArtifactError::NotFound(path.to_string())),
            status if !status.is_success() => Err(ArtifactError::Upstream {
                status: status.as_u16(),
            }),
            _ => Ok(response),
        }
    }

    async fn fetch_raw(&self, path: &str) -> ArtifactResult<Vec<u8>> {
        debug!("Fetching raw content for {}", path);
        let bytes = self
            .send(path, RAW_MEDIA_TYPE)
            .await?
            .bytes()
            .await
            .map_err(ArtifactError::from_reqwest)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ScriptStore for GitHubScriptStore {
    fn provider_name(&self) -> &'static str {
        "GitHub"
    }

    async fn get_content(&self, path: &str) -> ArtifactResult<Vec<u8>> {
        debug!("Fetching {} from {}/{}", path, self.config.owner, self.config.repo);

        let body: ContentsResponse = self
            .send(path, JSON_MEDIA_TYPE)
            .await?
            .json()
            .await
            .map_err(|e| ArtifactError::Decode(format!("failed to parse contents response: {e}")))?;

        if body.encoding != "base64" {
            // Files above the inline limit come back with encoding "none".
            return self.fetch_raw(path).await;
        }

        // GitHub wraps the base64 payload at 60 columns.
        let compact: String = body.content.split_ascii_whitespace().collect();
        BASE64
            .decode(compact)
            .map_err(|e| ArtifactError::Decode(format!("invalid base64 content: {e}")))
    }

    async fn exists(&self, path: &str) -> ArtifactResult<bool> {
        match self.send(path, JSON_MEDIA_TYPE).await {
            Ok(_) => Ok(true),
            Err(ArtifactError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
