//! Document upload and listing

use axum::extract::{Multipart, State};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::UploadedFile;
use crate::infrastructure::ingestion::upload_name;
use crate::infrastructure::services::RebuildOutcome;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub stored: Vec<String>,
    pub rebuild: RebuildOutcome,
}

#[derive(Debug, Serialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<UploadedFile>,
    pub total: usize,
}

/// Validate every file part before storing any of them, then rebuild once
pub async fn upload_documents(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "Ignoring non-file multipart field");
            continue;
        };
        let name = upload_name(&filename)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file '{}': {}", filename, e)))?;

        files.push((name, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("No files provided"));
    }

    let mut stored = Vec::new();
    for (name, bytes) in files {
        match state.knowledge_base.store_upload(&name, bytes).await {
            Ok(path) => {
                info!(file = %name, path = %path.display(), "Stored uploaded document");
                stored.push(name);
            }
            Err(e) => {
                // Stored files are always indexed
                if !stored.is_empty() {
                    if let Err(rebuild_err) = state.knowledge_base.rebuild().await {
                        warn!(error = %rebuild_err, "Rebuild after partial upload failed");
                    }
                }
                return Err(e.into());
            }
        }
    }

    let rebuild = state.knowledge_base.rebuild().await?;

    Ok(Json(UploadResponse { stored, rebuild }))
}

pub async fn list_documents(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ListDocumentsResponse>, ApiError> {
    let documents = state.knowledge_base.list_uploads().await?;
    let total = documents.len();

    Ok(Json(ListDocumentsResponse { documents, total }))
}
