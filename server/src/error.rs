//! HTTP error responses.

use activator_activation::ActivationError;
use activator_artifacts::ArtifactError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Any failure a handler can return.
///
/// The response body is always `{"error": <generic message>}`; detail only
/// reaches the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error("unsupported launcher platform: {0:?}")]
    UnsupportedPlatform(Option<String>),

    #[error("invalid launcher version: {0:?}")]
    InvalidVersion(String),

    #[error("launcher not found: {0}")]
    LauncherNotFound(String),

    #[error("launcher download failed: {0}")]
    LauncherFetch(#[source] ArtifactError),
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Activation(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::UnsupportedPlatform(_) | Self::InvalidVersion(_) => StatusCode::BAD_REQUEST,
            Self::LauncherNotFound(_) => StatusCode::NOT_FOUND,
            Self::LauncherFetch(_) => StatusCode::BAD_GATEWAY,
        }
    }

    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Activation(e) => e.public_message(),
            Self::UnsupportedPlatform(_) => "unsupported platform",
            Self::InvalidVersion(_) => "invalid version",
            Self::LauncherNotFound(_) => "file not found",
            Self::LauncherFetch(_) => "download failed",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Activation(ActivationError::InvalidParameters(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Activation(ActivationError::InvalidParameters(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status.as_u16(), self);
        } else {
            debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
