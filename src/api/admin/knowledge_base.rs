//! Knowledge base rebuild and status

use axum::extract::State;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::IndexStatus;
use crate::infrastructure::services::RebuildOutcome;

pub async fn rebuild(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<RebuildOutcome>, ApiError> {
    Ok(Json(state.knowledge_base.rebuild().await?))
}

pub async fn status(State(state): State<AppState>, _admin: RequireAdmin) -> Json<IndexStatus> {
    Json(state.knowledge_base.index().status().await)
}
