//! Conversation log trait

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{Channel, ConversationRecord};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence for conversation history
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConversationLog: Send + Sync {
    /// Appends a record
    async fn record(&self, record: ConversationRecord) -> Result<(), DomainError>;

    /// Lists a user's records in insertion order, optionally for one channel
    async fn list_for_user(
        &self,
        user_id: &str,
        channel: Option<Channel>,
    ) -> Result<Vec<ConversationRecord>, DomainError>;

    /// Lists the channels that have at least one record
    async fn channels(&self) -> Result<Vec<Channel>, DomainError>;

    /// Lists distinct users in first-contact order, optionally for one channel or UTC day
    async fn list_users(
        &self,
        channel: Option<Channel>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<String>, DomainError>;

    /// Lists the UTC days with at least one record, newest first
    async fn dates(&self) -> Result<Vec<NaiveDate>, DomainError>;
}
