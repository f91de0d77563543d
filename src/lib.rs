//! Helpdesk RAG
//!
//! Multi-channel support chatbot backend:
//! - Document store of an FAQ file plus admin uploads (text, PDF)
//! - Chunking, embedding and a copy-and-swap vector index
//! - Retrieval-augmented answers for web, SMS and WhatsApp messages
//! - Admin API for uploads, rebuilds and conversation history

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use infrastructure::{
    conversation::InMemoryConversationLog,
    embedding::EmbedderFactory,
    index::{FileIndexStore, VectorIndex},
    ingestion::{FsDocumentLoader, RecursiveChunker},
    llm::LlmProviderFactory,
    observability::PrometheusMetrics,
    services::{AnsweringConfig, AnsweringEngine, KnowledgeBaseManager},
};
use tracing::info;

/// Core services shared by the server and the one-shot commands
#[derive(Debug, Clone)]
pub struct Services {
    pub knowledge_base: Arc<KnowledgeBaseManager>,
    pub answering: Arc<AnsweringEngine>,
}

/// Build the knowledge base manager and answering engine from configuration
pub fn build_services(config: &AppConfig) -> anyhow::Result<Services> {
    config.knowledge.validate()?;

    let embedder = EmbedderFactory::create(&config.embedding)?;
    let index = Arc::new(VectorIndex::new(
        embedder,
        Arc::new(FileIndexStore::new(&config.knowledge.index_dir)),
    ));

    let loader = FsDocumentLoader::new(&config.knowledge.upload_dir)
        .with_faq(&config.knowledge.faq_path, config.knowledge.faq_required);

    let knowledge_base = KnowledgeBaseManager::new(
        Arc::new(loader),
        Arc::new(RecursiveChunker::new()),
        config.knowledge.chunking(),
        index.clone(),
    )?;

    let generation = &config.generation;
    let answering = AnsweringEngine::new(
        index,
        LlmProviderFactory::create(generation)?,
        AnsweringConfig {
            model: generation.model.clone(),
            top_k: config.knowledge.top_k,
            temperature: Some(generation.temperature),
            max_tokens: Some(generation.max_tokens),
            timeout: Duration::from_secs(generation.timeout_secs),
        },
    );

    info!(
        faq = %config.knowledge.faq_path.display(),
        uploads = %config.knowledge.upload_dir.display(),
        index = %config.knowledge.index_dir.display(),
        model = %generation.model,
        "Services configured"
    );

    Ok(Services {
        knowledge_base: Arc::new(knowledge_base),
        answering: Arc::new(answering),
    })
}

/// Create the application state around already built services
pub fn create_app_state(
    config: &AppConfig,
    services: &Services,
    metrics: Option<PrometheusMetrics>,
) -> AppState {
    AppState::new(
        services.knowledge_base.clone(),
        services.answering.clone(),
        Arc::new(InMemoryConversationLog::new()),
    )
    .with_admin_token(config.admin.token.clone())
    .with_metrics(metrics)
}
