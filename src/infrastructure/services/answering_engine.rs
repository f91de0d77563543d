//! Answering engine - retrieval augmented answer generation

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::domain::answer::build_prompt;
use crate::domain::{Answer, AnswerRequest, Channel, DomainError, LlmProvider, FALLBACK_ANSWER};
use crate::infrastructure::index::VectorIndex;
use crate::infrastructure::observability::record_answer;

/// Generation settings for the answering engine
#[derive(Debug, Clone)]
pub struct AnsweringConfig {
    pub model: String,
    pub top_k: usize,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl Default for AnsweringConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            top_k: 4,
            temperature: Some(0.0),
            max_tokens: Some(512),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Answers questions from the currently published index snapshot
#[derive(Debug)]
pub struct AnsweringEngine {
    index: Arc<VectorIndex>,
    llm: Arc<dyn LlmProvider>,
    config: AnsweringConfig,
}

impl AnsweringEngine {
    pub fn new(index: Arc<VectorIndex>, llm: Arc<dyn LlmProvider>, config: AnsweringConfig) -> Self {
        Self { index, llm, config }
    }

    pub fn config(&self) -> &AnsweringConfig {
        &self.config
    }

    /// Answer a bare question, as asked from the command line
    pub async fn answer(&self, question: &str) -> Result<String, DomainError> {
        let request = AnswerRequest::new(question, Channel::Web, "cli");
        Ok(self.answer_for(&request).await?.text)
    }

    /// Retrieve context for the question and generate an answer from it
    #[instrument(
        skip(self, request),
        fields(channel = %request.channel, user = %request.user_context)
    )]
    pub async fn answer_for(&self, request: &AnswerRequest) -> Result<Answer, DomainError> {
        let start = Instant::now();
        let result = self.generate(request).await;

        let outcome = match &result {
            Ok(answer) if answer.text == FALLBACK_ANSWER => "fallback",
            Ok(_) => "answered",
            Err(e) if e.is_generation_timeout() => "timeout",
            Err(_) => "failed",
        };
        record_answer(outcome, start.elapsed());

        result
    }

    async fn generate(&self, request: &AnswerRequest) -> Result<Answer, DomainError> {
        let question = request.question.trim();
        if question.is_empty() {
            return Err(DomainError::validation("question must not be empty"));
        }

        let query = self.index.embedder().embed_query(question).await?;

        let hits = match self.index.search(&query, self.config.top_k).await {
            Ok(hits) => hits,
            Err(e) if e.is_index_empty() => {
                debug!("No index published, answering without context");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let mut builder = build_prompt(question, &hits);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        let chat = self.llm.chat(&self.config.model, builder.build());
        let response = match tokio::time::timeout(self.config.timeout, chat).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(error = %e, provider = self.llm.provider_name(), "Generation failed");
                return Err(DomainError::generation(e.to_string()));
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "Generation timed out"
                );
                return Err(DomainError::generation_timeout(format!(
                    "no reply within {:?}",
                    self.config.timeout
                )));
            }
        };

        let text = match response.content() {
            Some(text) => text.trim().to_string(),
            None => {
                debug!("Model returned no content, using fallback answer");
                FALLBACK_ANSWER.to_string()
            }
        };

        info!(sources = hits.len(), "Answer generated");

        Ok(Answer { text, sources: hits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::{Chunk, DocumentKind, SourceDocument};
    use crate::domain::llm::{LlmResponse, Message, MessageRole, MockLlmProvider};
    use crate::domain::GenerationFailure;
    use crate::infrastructure::embedding::{Embedder, HashingEmbeddingProvider};
    use crate::infrastructure::index::InMemoryIndexStore;

    fn index() -> Arc<VectorIndex> {
        let provider = Arc::new(HashingEmbeddingProvider::new(128).unwrap());
        Arc::new(VectorIndex::new(
            Embedder::with_default_model(provider),
            Arc::new(InMemoryIndexStore::new()),
        ))
    }

    fn chunk(source: &str, text: &str) -> Chunk {
        let doc = SourceDocument::new(source, DocumentKind::Faq, text);
        Chunk::new(&doc, 0, 0, text.chars().count(), text)
    }

    fn engine(index: Arc<VectorIndex>, llm: MockLlmProvider) -> (AnsweringEngine, Arc<MockLlmProvider>) {
        let llm = Arc::new(llm);
        let engine = AnsweringEngine::new(index, llm.clone(), AnsweringConfig::default());
        (engine, llm)
    }

    #[tokio::test]
    async fn test_answer_uses_retrieved_context() {
        let index = index();
        index
            .rebuild(vec![
                chunk("FAQ.txt", "Q: What are your hours? A: 9-5."),
                chunk("returns.txt", "Returns are accepted within 30 days."),
            ])
            .await
            .unwrap();
        let (engine, llm) = engine(index, MockLlmProvider::new("mock").with_responder(|_| "9-5".into()));

        let answer = engine.answer("What are your hours?").await.unwrap();

        assert_eq!(answer, "9-5");
        let requests = llm.requests();
        let system = requests[0].first_of(MessageRole::System).unwrap();
        let faq_at = system.find("[FAQ.txt]").unwrap();
        let returns_at = system.find("[returns.txt]").unwrap();
        assert!(faq_at < returns_at);
    }

    #[tokio::test]
    async fn test_empty_index_still_calls_model_with_empty_context() {
        let (engine, llm) = engine(
            index(),
            MockLlmProvider::new("mock").with_responder(|_| FALLBACK_ANSWER.into()),
        );

        let answer = engine
            .answer_for(&AnswerRequest::new("Where are you?", Channel::Sms, "+15550001"))
            .await
            .unwrap();

        assert_eq!(answer.text, FALLBACK_ANSWER);
        assert!(answer.sources.is_empty());
        let system = llm.requests()[0].first_of(MessageRole::System).unwrap().to_string();
        assert!(system.ends_with("Context:\n"));
    }

    #[tokio::test]
    async fn test_blank_model_reply_becomes_fallback() {
        let response = LlmResponse::new("id", "m", Message::assistant("   "));
        let (engine, _) = engine(index(), MockLlmProvider::new("mock").with_response(response));

        let answer = engine.answer("anything").await.unwrap();

        assert_eq!(answer, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let (engine, llm) = engine(index(), MockLlmProvider::new("mock").with_responder(|_| "x".into()));

        let err = engine.answer("   ").await.unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(llm.requests().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_is_generation_failure() {
        let (engine, _) = engine(index(), MockLlmProvider::new("mock").with_error("503 upstream"));

        let err = engine.answer("hello").await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Generation { kind: GenerationFailure::Failed, .. }
        ));
    }

    #[tokio::test]
    async fn test_slow_model_times_out() {
        let llm = Arc::new(
            MockLlmProvider::new("mock")
                .with_delay(Duration::from_millis(200))
                .with_responder(|_| "late".into()),
        );
        let engine = AnsweringEngine::new(
            index(),
            llm,
            AnsweringConfig {
                timeout: Duration::from_millis(20),
                ..Default::default()
            },
        );

        let err = engine.answer("hello").await.unwrap_err();

        assert!(err.is_generation_timeout());
    }

    #[tokio::test]
    async fn test_generation_settings_forwarded() {
        let llm = Arc::new(MockLlmProvider::new("mock").with_responder(|_| "ok".into()));
        let engine = AnsweringEngine::new(
            index(),
            llm.clone(),
            AnsweringConfig {
                temperature: Some(0.2),
                max_tokens: Some(64),
                ..Default::default()
            },
        );

        engine.answer("hello").await.unwrap();

        let request = &llm.requests()[0];
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(64));
    }
}
