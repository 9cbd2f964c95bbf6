//! Launcher binary downloads.
//!
//! Launchers live in the script store under a configured directory, named
//! `launcher_<platform>[_v<version>][.<ext>]`.

use crate::error::ApiError;
use crate::AppState;
use activator_artifacts::ArtifactError;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::info;

/// Supported launcher platforms and their file extension.
pub const LAUNCHER_PLATFORMS: &[(&str, Option<&str>)] = &[
    ("win_x64", Some("exe")),
    ("linux_x64", None),
    ("macos_x64", None),
];

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub platform: Option<String>,
    pub version: Option<String>,
}

/// File name of the launcher for `platform`, or `None` if unsupported.
#[must_use]
pub fn launcher_file_name(platform: &str, version: Option<&str>) -> Option<String> {
    let (name, ext) = LAUNCHER_PLATFORMS.iter().find(|(p, _)| *p == platform)?;
    let mut file_name = format!("launcher_{name}");
    if let Some(version) = version.filter(|v| !v.is_empty()) {
        file_name.push_str("_v");
        file_name.push_str(version);
    }
    if let Some(ext) = ext {
        file_name.push('.');
        file_name.push_str(ext);
    }
    Some(file_name)
}

fn valid_version(version: &str) -> bool {
    !version.is_empty()
        && !version.contains("..")
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

pub(crate) async fn download_launcher(
    State(state): State<AppState>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let version = query.version.as_deref().filter(|v| !v.is_empty());
    if let Some(v) = version.filter(|v| !valid_version(v)) {
        return Err(ApiError::InvalidVersion(v.to_string()));
    }

    let file_name = query
        .platform
        .as_deref()
        .and_then(|p| launcher_file_name(p, version))
        .ok_or_else(|| ApiError::UnsupportedPlatform(query.platform.clone()))?;

    let dir = state.launcher_path.trim_end_matches('/');
    let path = if dir.is_empty() {
        file_name.clone()
    } else {
        format!("{dir}/{file_name}")
    };

    let scripts = state.activator.scripts();
    if !scripts.exists(&path).await.map_err(ApiError::LauncherFetch)? {
        return Err(ApiError::LauncherNotFound(path));
    }
    let content = scripts.get_content(&path).await.map_err(|e| match e {
        ArtifactError::NotFound(p) => ApiError::LauncherNotFound(p),
        other => ApiError::LauncherFetch(other),
    })?;

    info!("Serving launcher {} ({} bytes)", file_name, content.len());
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        content,
    )
        .into_response())
}
