//! Liveness probe

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `"connected"` once a request has opened the store, else `"idle"`.
    /// Never triggers a connection itself.
    pub store: &'static str,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = if state.db().is_connected() {
        "connected"
    } else {
        "idle"
    };
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
