//! Service info, health, and client configuration handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;

/// Settings a browser client needs before rendering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub maps_api_key: Option<String>,
}

/// Service info.
pub async fn index() -> Json<Value> {
    Json(json!({ "message": "CafeConnect Backend API" }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog backend is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Browser-facing configuration.
pub async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        maps_api_key: state.config().maps_api_key.clone(),
    })
}
