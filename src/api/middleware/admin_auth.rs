//! Admin authentication extractor
//!
//! Accepts the configured admin token from either:
//! - `Authorization: Bearer <token>`
//! - `X-Admin-Token: <token>`

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extractor that requires the admin token
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

fn presented_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    bearer
        .or_else(|| headers.get(ADMIN_TOKEN_HEADER).and_then(|v| v.to_str().ok()))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Compare digests so the comparison time does not depend on the token prefix
fn tokens_match(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(ref expected) = state.admin_token else {
            return Err(ApiError::forbidden("Admin API is disabled: no admin token configured"));
        };

        match presented_token(&parts.headers) {
            Some(token) if tokens_match(token, expected) => {
                debug!("Admin access granted");
                Ok(RequireAdmin)
            }
            Some(_) => Err(ApiError::unauthorized("Invalid admin token")),
            None => Err(ApiError::unauthorized(
                "Admin access required. Provide Authorization: Bearer <token> or X-Admin-Token",
            )),
        }
    }
}
