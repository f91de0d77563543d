//! Channel webhooks
//!
//! Web callers get the answer in the response body. SMS and WhatsApp
//! (Twilio form posts) get an empty TwiML document; delivering the reply
//! is left to the messaging provider integration.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{AnswerRequest, Channel, ConversationRecord, DomainError};

/// Reply sent when no answer could be generated
pub const APOLOGY: &str =
    "Sorry, I can't answer right now. Please try again in a few minutes.";

const EMPTY_TWIML: &str = "<Response></Response>";

#[derive(Debug, Deserialize)]
pub struct WebMessage {
    pub sender_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct WebReply {
    pub answer: String,
}

/// Twilio webhook fields
#[derive(Debug, Deserialize)]
pub struct TwilioMessage {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body")]
    pub body: String,
}

pub async fn web_hook(
    State(state): State<AppState>,
    Json(message): Json<WebMessage>,
) -> Result<Json<WebReply>, ApiError> {
    let answer = converse(&state, Channel::Web, &message.sender_id, &message.message).await?;

    Ok(Json(WebReply { answer }))
}

pub async fn sms_hook(
    State(state): State<AppState>,
    Form(message): Form<TwilioMessage>,
) -> Result<impl IntoResponse, ApiError> {
    converse(&state, Channel::Sms, message.from.trim(), &message.body).await?;

    Ok(twiml())
}

pub async fn whatsapp_hook(
    State(state): State<AppState>,
    Form(message): Form<TwilioMessage>,
) -> Result<impl IntoResponse, ApiError> {
    let from = message.from.trim();
    let sender = from.strip_prefix("whatsapp:").unwrap_or(from);
    converse(&state, Channel::Whatsapp, sender, &message.body).await?;

    Ok(twiml())
}

fn twiml() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/xml")], EMPTY_TWIML)
}

/// Log the question, answer it and log the reply
async fn converse(
    state: &AppState,
    channel: Channel,
    sender: &str,
    text: &str,
) -> Result<String, ApiError> {
    if sender.trim().is_empty() {
        return Err(ApiError::bad_request("sender must not be empty"));
    }
    if text.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    log_record(state, ConversationRecord::user(sender, channel, text)).await;

    let request = AnswerRequest::new(text, channel, sender);
    let reply = match state.answering.answer_for(&request).await {
        Ok(answer) => answer.text,
        Err(e @ (DomainError::Generation { .. } | DomainError::EmbeddingUnavailable { .. })) => {
            warn!(channel = %channel, error = %e, "Answering failed, sending apology");
            APOLOGY.to_string()
        }
        Err(e) => return Err(e.into()),
    };

    log_record(state, ConversationRecord::bot(sender, channel, &reply)).await;
    info!(channel = %channel, "Replied to message");

    Ok(reply)
}

async fn log_record(state: &AppState, record: ConversationRecord) {
    if let Err(e) = state.conversations.record(record).await {
        warn!(error = %e, "Failed to log conversation record");
    }
}
