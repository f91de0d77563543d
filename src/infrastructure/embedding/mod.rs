//! Embedding provider implementations

mod embedder;
mod factory;
mod hashing;
mod ollama;
mod openai;

pub use embedder::Embedder;
pub use factory::EmbedderFactory;
pub use hashing::{HashingEmbeddingProvider, HASHING_MODEL};
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;
