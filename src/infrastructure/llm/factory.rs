use std::sync::Arc;
use std::time::Duration;

use super::OpenAiProvider;
use crate::config::GenerationConfig;
use crate::domain::{DomainError, LlmProvider};
use crate::infrastructure::http_client::HttpClient;

/// Factory for creating the generation provider
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an OpenAI-compatible provider from configuration
    pub fn create(config: &GenerationConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        // Leave room past the engine's own deadline so it reports the timeout
        let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs + 5))?;

        Ok(Arc::new(OpenAiProvider::with_base_url(
            client,
            config.api_key.clone(),
            &config.base_url,
        )))
    }
}
