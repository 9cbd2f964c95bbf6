//! HTTP surface of the machine activation service.
//!
//! Routes:
//! - `POST /activate-machine` (also `/api/activate-machine`)
//! - `GET /download-launcher?platform=&version=` (also under `/api`)
//! - `GET /health`

mod client;
mod config;
mod download;
mod error;

pub use client::{ActivationClient, ClientError, ClientResult, DeliveredScript};
pub use config::{AddScriptArgs, Cli, Command, IssueTokenArgs, ServeArgs};
pub use download::{launcher_file_name, DownloadQuery, LAUNCHER_PLATFORMS};
pub use error::ApiError;

use activator_activation::{ActivationRequest, ActivationResponse, Activator};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub activator: Activator,
    /// Directory in the script store holding launcher binaries.
    pub launcher_path: Arc<str>,
}

impl AppState {
    pub fn new(activator: Activator, launcher_path: impl Into<Arc<str>>) -> Self {
        Self {
            activator,
            launcher_path: launcher_path.into(),
        }
    }
}

async fn activate_machine(
    State(state): State<AppState>,
    payload: Result<Json<ActivationRequest>, JsonRejection>,
) -> Result<Json<ActivationResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.activator.activate(&request).await?;
    Ok(Json(response))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the HTTP router with the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/activate-machine", post(activate_machine))
        .route("/api/activate-machine", post(activate_machine))
        .route("/download-launcher", get(download::download_launcher))
        .route("/api/download-launcher", get(download::download_launcher))
        .route("/health", get(health))
        .with_state(state)
}
