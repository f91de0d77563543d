//! Application state for shared services

use std::sync::Arc;

use crate::domain::ConversationLog;
use crate::infrastructure::observability::PrometheusMetrics;
use crate::infrastructure::services::{AnsweringEngine, KnowledgeBaseManager};

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub knowledge_base: Arc<KnowledgeBaseManager>,
    pub answering: Arc<AnsweringEngine>,
    pub conversations: Arc<dyn ConversationLog>,
    /// Admin routes answer 403 while this is unset
    pub admin_token: Option<String>,
    pub metrics: Option<PrometheusMetrics>,
}

impl AppState {
    pub fn new(
        knowledge_base: Arc<KnowledgeBaseManager>,
        answering: Arc<AnsweringEngine>,
        conversations: Arc<dyn ConversationLog>,
    ) -> Self {
        Self {
            knowledge_base,
            answering,
            conversations,
            admin_token: None,
            metrics: None,
        }
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_metrics(mut self, metrics: Option<PrometheusMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}
