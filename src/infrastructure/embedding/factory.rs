//! Build the embedder from configuration

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{Embedder, HashingEmbeddingProvider, OllamaEmbeddingProvider, OpenAiEmbeddingProvider};
use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::http_client::HttpClient;

/// Factory for the embedding function
#[derive(Debug)]
pub struct EmbedderFactory;

impl EmbedderFactory {
    pub fn create(config: &EmbeddingConfig) -> Result<Embedder, DomainError> {
        let provider = Self::create_provider(config)?;

        let model = config
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());

        // Only the v3 OpenAI models accept a requested vector size
        let request_dimensions = config.provider == EmbeddingBackend::OpenAi
            && model.starts_with("text-embedding-3");

        let mut embedder = Embedder::new(provider, model).with_batch_size(config.batch_size);
        if request_dimensions {
            embedder = embedder.with_request_dimensions(config.dimensions);
        }

        info!(
            provider = embedder.provider_name(),
            model = %embedder.model(),
            dimensions = ?embedder.dimensions(),
            "Embedding function configured"
        );

        Ok(embedder)
    }

    fn create_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let provider: Arc<dyn EmbeddingProvider> = match config.provider {
            EmbeddingBackend::Hashing => Arc::new(HashingEmbeddingProvider::new(config.dimensions)?),
            EmbeddingBackend::OpenAi => {
                let client = HttpClient::with_timeout(timeout)?;
                match config.base_url {
                    Some(ref url) => Arc::new(OpenAiEmbeddingProvider::with_base_url(
                        client,
                        config.api_key.clone(),
                        url,
                    )),
                    None => Arc::new(OpenAiEmbeddingProvider::new(client, config.api_key.clone())),
                }
            }
            EmbeddingBackend::Ollama => {
                let client = HttpClient::with_timeout(timeout)?;
                match config.base_url {
                    Some(ref url) => Arc::new(OllamaEmbeddingProvider::with_base_url(client, url)),
                    None => Arc::new(OllamaEmbeddingProvider::new(client)),
                }
            }
        };

        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::embedding::HASHING_MODEL;

    #[test]
    fn test_default_config_uses_hashing() {
        let embedder = EmbedderFactory::create(&EmbeddingConfig::default()).unwrap();

        assert_eq!(embedder.provider_name(), "hashing");
        assert_eq!(embedder.model(), HASHING_MODEL);
        assert_eq!(embedder.dimensions(), Some(384));
    }

    #[test]
    fn test_openai_v3_model_requests_dimensions() {
        let config = EmbeddingConfig {
            provider: EmbeddingBackend::OpenAi,
            dimensions: 256,
            ..Default::default()
        };

        let embedder = EmbedderFactory::create(&config).unwrap();

        assert_eq!(embedder.model(), "text-embedding-3-small");
        assert_eq!(embedder.dimensions(), Some(256));
    }

    #[test]
    fn test_ollama_model_override() {
        let config = EmbeddingConfig {
            provider: EmbeddingBackend::Ollama,
            model: Some("mxbai-embed-large".to_string()),
            ..Default::default()
        };

        let embedder = EmbedderFactory::create(&config).unwrap();

        assert_eq!(embedder.provider_name(), "ollama");
        assert_eq!(embedder.model(), "mxbai-embed-large");
    }

    #[test]
    fn test_zero_hashing_dimensions_rejected() {
        let config = EmbeddingConfig {
            dimensions: 0,
            ..Default::default()
        };

        assert!(EmbedderFactory::create(&config).is_err());
    }
}
