//! End-to-end flows through the manager, the index and the answering engine

use std::sync::Arc;
use tempfile::TempDir;

use super::{AnsweringConfig, AnsweringEngine, KnowledgeBaseManager, RebuildOutcome};
use crate::domain::llm::{LlmRequest, MessageRole, MockLlmProvider};
use crate::domain::{ChunkingConfig, FALLBACK_ANSWER};
use crate::infrastructure::embedding::{Embedder, HashingEmbeddingProvider};
use crate::infrastructure::index::{FileIndexStore, VectorIndex};
use crate::infrastructure::ingestion::{FsDocumentLoader, RecursiveChunker};

/// Stands in for the model: echoes the best-ranked chunk, or the fallback
/// when the prompt carries no context
fn echo_top_chunk(request: &LlmRequest) -> String {
    let system = request.first_of(MessageRole::System).unwrap_or_default();
    let context = system.split("Context:\n").nth(1).unwrap_or_default();

    match context.split("\n\n").next() {
        Some(block) if !block.trim().is_empty() => {
            block.lines().skip(1).collect::<Vec<_>>().join("\n")
        }
        _ => FALLBACK_ANSWER.to_string(),
    }
}

struct Bot {
    _dir: TempDir,
    manager: KnowledgeBaseManager,
    engine: AnsweringEngine,
}

fn bot(faq: Option<&str>) -> Bot {
    let dir = TempDir::new().unwrap();
    let faq_path = dir.path().join("FAQ.txt");
    if let Some(text) = faq {
        std::fs::write(&faq_path, text).unwrap();
    }

    let loader = FsDocumentLoader::new(dir.path().join("uploads")).with_faq(&faq_path, false);
    let provider = Arc::new(HashingEmbeddingProvider::new(256).unwrap());
    let index = Arc::new(VectorIndex::new(
        Embedder::with_default_model(provider),
        Arc::new(FileIndexStore::new(dir.path().join("index"))),
    ));

    let manager = KnowledgeBaseManager::new(
        Arc::new(loader),
        Arc::new(RecursiveChunker::new()),
        ChunkingConfig::new(200, 20),
        index.clone(),
    )
    .unwrap();
    let engine = AnsweringEngine::new(
        index,
        Arc::new(MockLlmProvider::new("mock").with_responder(echo_top_chunk)),
        AnsweringConfig::default(),
    );

    Bot {
        _dir: dir,
        manager,
        engine,
    }
}

#[tokio::test]
async fn test_faq_question_is_answered_from_faq() {
    let bot = bot(Some("Q: What are your hours? A: 9-5."));

    let outcome = bot.manager.rebuild().await.unwrap();
    assert!(matches!(outcome, RebuildOutcome::Rebuilt(_)));

    let answer = bot.engine.answer("What are your hours?").await.unwrap();
    assert!(answer.contains("9-5"));
}

#[tokio::test]
async fn test_empty_store_answers_with_fallback() {
    let bot = bot(None);

    let outcome = bot.manager.rebuild().await.unwrap();
    assert!(matches!(outcome, RebuildOutcome::SkippedEmpty));

    let answer = bot.engine.answer("Anything?").await.unwrap();
    assert_eq!(answer, FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_uploaded_document_becomes_answerable_after_rebuild() {
    let bot = bot(Some("Q: What are your hours? A: 9-5."));
    bot.manager.rebuild().await.unwrap();

    bot.manager
        .store_upload(
            "warranty.txt",
            b"The warranty period is two years for every device.".to_vec(),
        )
        .await
        .unwrap();
    let RebuildOutcome::Rebuilt(stats) = bot.manager.rebuild().await.unwrap() else {
        panic!("expected a rebuild");
    };
    assert_eq!(stats.documents, 2);

    let answer = bot.engine.answer("What is the warranty period?").await.unwrap();
    assert!(answer.contains("two years"));
}

#[tokio::test]
async fn test_unreadable_upload_is_reported_and_skipped() {
    let bot = bot(Some("Q: Do you ship abroad? A: Yes, worldwide."));
    bot.manager
        .store_upload("broken.pdf", b"not really a pdf".to_vec())
        .await
        .unwrap();

    let RebuildOutcome::Rebuilt(stats) = bot.manager.rebuild().await.unwrap() else {
        panic!("expected a rebuild");
    };

    assert_eq!(stats.documents, 1);
    assert_eq!(stats.skipped_files.len(), 1);
    assert!(stats.skipped_files[0].source.ends_with("broken.pdf"));
}

#[tokio::test]
async fn test_persisted_index_survives_restart() {
    let dir = TempDir::new().unwrap();
    let faq_path = dir.path().join("FAQ.txt");
    std::fs::write(&faq_path, "Q: Where is the store? A: Main street.").unwrap();

    let open = || {
        let provider = Arc::new(HashingEmbeddingProvider::new(64).unwrap());
        Arc::new(VectorIndex::new(
            Embedder::with_default_model(provider),
            Arc::new(FileIndexStore::new(dir.path().join("index"))),
        ))
    };

    let first = open();
    let manager = KnowledgeBaseManager::new(
        Arc::new(FsDocumentLoader::new(dir.path().join("uploads")).with_faq(&faq_path, true)),
        Arc::new(RecursiveChunker::new()),
        ChunkingConfig::default(),
        first.clone(),
    )
    .unwrap();
    manager.rebuild().await.unwrap();

    let second = open();
    assert!(second.restore().await.unwrap());
    assert_eq!(
        second.status().await.fingerprint,
        first.status().await.fingerprint
    );
}
