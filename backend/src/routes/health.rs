//! Health check endpoints
//!
//! `/health` and `/health/live` answer from the process alone;
//! `/health/ready` additionally pings the SQLite pool and turns 503
//! while it is unreachable.

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl ProbeResponse {
    fn plain(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<ProbeResponse> {
    Json(ProbeResponse::plain("healthy"))
}

/// Readiness probe
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ProbeResponse>) {
    match db::health_check(state.db()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ProbeResponse {
                database: Some("healthy".to_string()),
                ..ProbeResponse::plain("ready")
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ProbeResponse {
                database: Some(e.to_string()),
                ..ProbeResponse::plain("not ready")
            }),
        ),
    }
}

/// Liveness probe, answers while the process is running
pub async fn liveness_check() -> Json<ProbeResponse> {
    Json(ProbeResponse::plain("alive"))
}
