//! Conversation log browsing

use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Channel, ConversationRecord};

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub user_id: String,
    #[serde(default)]
    pub channel: Option<String>,
    /// UTC day, `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ChannelsResponse {
    pub channels: Vec<Channel>,
}

#[derive(Debug, Serialize)]
pub struct ConversationsResponse {
    pub records: Vec<ConversationRecord>,
    pub total: usize,
}

pub async fn list_channels(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ChannelsResponse>, ApiError> {
    let channels = state.conversations.channels().await?;

    Ok(Json(ChannelsResponse { channels }))
}

pub async fn list_conversations(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<ConversationsResponse>, ApiError> {
    let channel = parse_channel(query.channel.as_deref())?;
    let date = parse_date(query.date.as_deref())?;

    let records: Vec<ConversationRecord> = state
        .conversations
        .list_for_user(&query.user_id, channel)
        .await?
        .into_iter()
        .filter(|r| date.is_none_or(|d| r.created_at.date_naive() == d))
        .collect();
    let total = records.len();

    Ok(Json(ConversationsResponse { records, total }))
}

pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, ApiError> {
    let channel = parse_channel(query.channel.as_deref())?;
    users_response(&state, channel, query.date.as_deref()).await
}

pub async fn list_channel_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(channel): Path<String>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, ApiError> {
    let channel = channel.parse::<Channel>()?;
    users_response(&state, Some(channel), query.date.as_deref()).await
}

pub async fn list_dates(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<DatesResponse>, ApiError> {
    let dates = state.conversations.dates().await?;

    Ok(Json(DatesResponse { dates }))
}

async fn users_response(
    state: &AppState,
    channel: Option<Channel>,
    date: Option<&str>,
) -> Result<Json<UsersResponse>, ApiError> {
    let date = parse_date(date)?;
    let users = state.conversations.list_users(channel, date).await?;
    let total = users.len();

    Ok(Json(UsersResponse { users, total }))
}

fn parse_channel(raw: Option<&str>) -> Result<Option<Channel>, ApiError> {
    Ok(raw
        .filter(|c| !c.is_empty())
        .map(str::parse::<Channel>)
        .transpose()?)
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    raw.filter(|d| !d.is_empty())
        .map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| ApiError::bad_request(format!("Invalid date: {} (expected YYYY-MM-DD)", d)))
        })
        .transpose()
}
