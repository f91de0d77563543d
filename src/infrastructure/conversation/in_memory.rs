//! In-memory conversation log for development and testing

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::conversation::{Channel, ConversationLog, ConversationRecord};
use crate::domain::DomainError;

/// Conversation history kept in process memory, lost on restart
#[derive(Debug, Default, Clone)]
pub struct InMemoryConversationLog {
    records: Arc<RwLock<Vec<ConversationRecord>>>,
}

impl InMemoryConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationLog for InMemoryConversationLog {
    async fn record(&self, record: ConversationRecord) -> Result<(), DomainError> {
        if record.user_id.trim().is_empty() {
            return Err(DomainError::validation("user_id must not be empty"));
        }

        self.records.write().await.push(record);
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        channel: Option<Channel>,
    ) -> Result<Vec<ConversationRecord>, DomainError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| channel.is_none_or(|c| r.channel == c))
            .cloned()
            .collect())
    }

    async fn channels(&self) -> Result<Vec<Channel>, DomainError> {
        let records = self.records.read().await;
        let channels: BTreeSet<Channel> = records.iter().map(|r| r.channel).collect();

        Ok(channels.into_iter().collect())
    }

    async fn list_users(
        &self,
        channel: Option<Channel>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<String>, DomainError> {
        let records = self.records.read().await;
        let mut seen = HashSet::new();

        Ok(records
            .iter()
            .filter(|r| channel.is_none_or(|c| r.channel == c))
            .filter(|r| date.is_none_or(|d| r.created_at.date_naive() == d))
            .filter(|r| seen.insert(r.user_id.as_str()))
            .map(|r| r.user_id.clone())
            .collect())
    }

    async fn dates(&self) -> Result<Vec<NaiveDate>, DomainError> {
        let records = self.records.read().await;
        let dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.created_at.date_naive()).collect();

        Ok(dates.into_iter().rev().collect())
    }
}
