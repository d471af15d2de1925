// Request handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use std::process::Stdio;
use tracing::{info, warn};

use super::AppState;
use crate::error::ApiError;
use crate::models::{ContainerInfo, NodeStatus, RestartResult, ServiceName};
use crate::version::{NAME, VERSION};

/// GET / — static control panel; talks to the API with the key the operator
/// saves in the browser.
pub(super) async fn index() -> Html<&'static str> {
    Html(include_str!("panel.html"))
}

/// GET /health — unauthenticated liveness probe.
pub(super) async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /services — running containers with normalized metadata.
pub(super) async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContainerInfo>>, ApiError> {
    let containers = state.docker.list_running().await.inspect_err(|e| {
        warn!("Container listing failed: {}", e);
    })?;
    Ok(Json(containers))
}

/// GET /status — aggregated host snapshot; fails as a whole on backend errors.
pub(super) async fn node_status(
    State(state): State<AppState>,
) -> Result<Json<NodeStatus>, ApiError> {
    let snapshot = state.status.snapshot().await.inspect_err(|e| {
        warn!("Status snapshot failed: {}", e);
    })?;
    Ok(Json(snapshot))
}

/// POST /restart/{service} — service must parse into the closed allow-list
/// before any Docker call is made.
pub(super) async fn restart_service(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<RestartResult>, ApiError> {
    let Ok(service) = service.parse::<ServiceName>() else {
        return Err(ApiError::InvalidService(service));
    };
    info!("Restart requested for {}", service);
    let result = state.docker.restart(service).await?;
    Ok(Json(result))
}

/// POST /deploy — fire-and-forget: the 200 confirms the launch, not the
/// deploy outcome.
pub(super) async fn deploy(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let script = &state.config.deploy_script;
    if !std::path::Path::new(script).exists() {
        return Err(ApiError::DeployScriptMissing(script.clone()));
    }

    tokio::process::Command::new("/bin/bash")
        .arg(script)
        .current_dir(&state.config.repo_root)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ApiError::DeployLaunch(e.to_string()))?;

    info!("Deploy triggered via {}", script);
    Ok(Json(serde_json::json!({ "message": "Deploy triggered" })))
}
