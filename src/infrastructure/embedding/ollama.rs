//! Ollama embedding provider (`/api/embed`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

#[derive(Debug, Serialize)]
struct BatchEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let body = serde_json::to_value(BatchEmbedRequest {
            model: request.model(),
            input: request.inputs(),
        })
        .map_err(|e| DomainError::internal(format!("Failed to encode request: {}", e)))?;

        let url = format!("{}/api/embed", self.base_url);
        let json = self
            .client
            .post_json(&url, vec![("Content-Type", "application/json")], &body)
            .await?;

        let response: BatchEmbedResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse embedding response: {}", e))
        })?;

        let embeddings = response
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(i, v)| Embedding::new(i, v))
            .collect();

        Ok(EmbeddingResponse::new(request.model(), embeddings))
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn default_model(&self) -> &'static str {
        "nomic-embed-text"
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        match model {
            "nomic-embed-text" => Some(768),
            "all-minilm" => Some(384),
            "mxbai-embed-large" => Some(1024),
            _ => None,
        }
    }
}
