//! Liveness and readiness endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;
use crate::domain::IndexStatus;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but answers come without retrieved context
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexStatus>,
}

/// Returns 200 whenever the process is up
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        index: None,
    })
}

/// Reports index readiness. Still 200 without an index since the bot
/// keeps answering with the fallback sentence.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let index = state.knowledge_base.index().status().await;
    let status = if index.ready {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            index: Some(index),
        }),
    )
}
