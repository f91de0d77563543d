//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI, Ollama, local hashing)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider
    fn default_model(&self) -> &'static str;

    /// Get the embedding dimensions for a model, if known up front
    fn dimensions(&self, model: &str) -> Option<usize>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::embedding::Embedding;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Mutex<Option<String>>,
        fail_on: Mutex<Option<String>>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: Mutex::new(None),
                fail_on: Mutex::new(None),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.set_error(Some(error.into()));
            self
        }

        pub fn set_error(&self, error: Option<String>) {
            *self.error.lock().unwrap() = error;
        }

        /// Fail any batch containing a text with this marker
        pub fn set_fail_on(&self, marker: Option<String>) {
            *self.fail_on.lock().unwrap() = marker;
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::provider(self.name, error));
            }

            if let Some(marker) = self.fail_on.lock().unwrap().clone() {
                if request.inputs().iter().any(|t| t.contains(&marker)) {
                    return Err(DomainError::provider(self.name, "connection reset"));
                }
            }

            let embeddings = request
                .inputs()
                .iter()
                .enumerate()
                .map(|(idx, text)| {
                    // Deterministic vector derived from the text bytes
                    let hash = text.bytes().fold(7u64, |acc, b| {
                        acc.wrapping_mul(31).wrapping_add(b as u64)
                    });
                    let vector: Vec<f32> = (0..self.dimensions)
                        .map(|i| ((hash.wrapping_add(i as u64 * 97) % 1000) as f32 / 1000.0) + 0.01)
                        .collect();

                    Embedding::new(idx, vector)
                })
                .collect();

            Ok(EmbeddingResponse::new(request.model(), embeddings))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn default_model(&self) -> &'static str {
            "mock-embedding"
        }

        fn dimensions(&self, _model: &str) -> Option<usize> {
            Some(self.dimensions)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_provider_batch_input() {
            let provider = MockEmbeddingProvider::new("test", 16);
            let request = EmbeddingRequest::new("mock-embedding", vec!["Hello".into(), "World".into()]);

            let response = provider.embed(request).await.unwrap();

            assert_eq!(response.len(), 2);
            assert_eq!(response.embeddings()[1].vector().len(), 16);
            assert_eq!(provider.calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_provider_fail_on_marker() {
            let provider = MockEmbeddingProvider::new("test", 8);
            provider.set_fail_on(Some("BOOM".into()));

            let ok = provider.embed(EmbeddingRequest::single("m", "fine")).await;
            let err = provider.embed(EmbeddingRequest::single("m", "a BOOM b")).await;

            assert!(ok.is_ok());
            assert!(err.is_err());
        }

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new("test", 32);

            let first = provider.embed(EmbeddingRequest::single("m", "Hello")).await.unwrap();
            let second = provider.embed(EmbeddingRequest::single("m", "Hello")).await.unwrap();

            assert_eq!(first.embeddings()[0].vector(), second.embeddings()[0].vector());
        }
    }
}
