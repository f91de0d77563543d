use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Channel;

/// Who wrote a logged message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One logged message of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: Uuid,
    pub user_id: String,
    pub channel: Channel,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationRecord {
    pub fn new(
        user_id: impl Into<String>,
        channel: Channel,
        role: Role,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            channel,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(user_id: impl Into<String>, channel: Channel, content: impl Into<String>) -> Self {
        Self::new(user_id, channel, Role::User, content)
    }

    pub fn bot(user_id: impl Into<String>, channel: Channel, content: impl Into<String>) -> Self {
        Self::new(user_id, channel, Role::Bot, content)
    }
}
