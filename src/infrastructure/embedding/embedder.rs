//! Embedding function shared by indexing and querying

use std::sync::Arc;
use tracing::debug;

use crate::domain::embedding::{normalize, EmbeddingProvider, EmbeddingRequest};
use crate::domain::DomainError;

const DEFAULT_BATCH_SIZE: usize = 64;

/// Maps texts to unit-length vectors through one provider and model.
///
/// Every failure surfaces as `EmbeddingUnavailable`.
#[derive(Debug, Clone)]
pub struct Embedder {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    batch_size: usize,
    request_dimensions: Option<usize>,
}

impl Embedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            request_dimensions: None,
        }
    }

    /// Use the provider's default model
    pub fn with_default_model(provider: Arc<dyn EmbeddingProvider>) -> Self {
        let model = provider.default_model().to_string();
        Self::new(provider, model)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Ask the provider to produce vectors of this size
    pub fn with_request_dimensions(mut self, dimensions: usize) -> Self {
        self.request_dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Vector size, when known before embedding anything
    pub fn dimensions(&self) -> Option<usize> {
        self.request_dimensions
            .or_else(|| self.provider.dimensions(&self.model))
    }

    /// Embed texts in order, batching provider calls
    pub async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let mut request = EmbeddingRequest::new(&self.model, batch.to_vec());
            if let Some(dims) = self.request_dimensions {
                request = request.with_dimensions(dims);
            }

            let response = self.provider.embed(request).await.map_err(|e| {
                DomainError::embedding_unavailable(format!(
                    "{} failed to embed batch: {}",
                    self.provider.provider_name(),
                    e
                ))
            })?;

            if response.len() != batch.len() {
                return Err(DomainError::embedding_unavailable(format!(
                    "expected {} vectors, got {}",
                    batch.len(),
                    response.len()
                )));
            }

            vectors.extend(response.into_vectors());
            debug!(embedded = vectors.len(), total = texts.len(), "Embedded batch");
        }

        let dims = vectors.first().map(Vec::len).unwrap_or_default();
        for vector in vectors.iter_mut() {
            if vector.len() != dims {
                return Err(DomainError::embedding_unavailable(format!(
                    "inconsistent vector size {} (expected {})",
                    vector.len(),
                    dims
                )));
            }

            if !normalize(vector) {
                return Err(DomainError::embedding_unavailable(
                    "provider returned a zero or non-finite vector",
                ));
            }
        }

        Ok(vectors)
    }

    /// Embed a single query with the same encoding as indexed chunks
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        self.embed_all(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| DomainError::embedding_unavailable("no vector returned for query"))
    }
}
