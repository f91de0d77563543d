//! Admin API endpoints

pub mod conversations;
pub mod documents;
pub mod knowledge_base;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Largest accepted multipart upload
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Document store
        .route(
            "/documents",
            get(documents::list_documents)
                .post(documents::upload_documents)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Knowledge base
        .route("/knowledge-base/rebuild", post(knowledge_base::rebuild))
        .route("/knowledge-base/status", get(knowledge_base::status))
        // Conversation log
        .route("/channels", get(conversations::list_channels))
        .route("/channels/{channel}/users", get(conversations::list_channel_users))
        .route("/users", get(conversations::list_users))
        .route("/dates", get(conversations::list_dates))
        .route("/conversations", get(conversations::list_conversations))
}
