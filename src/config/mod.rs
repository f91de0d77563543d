//! Layered application configuration

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, EmbeddingBackend, EmbeddingConfig, GenerationConfig, KnowledgeConfig,
    LogFormat, LoggingConfig, MetricsConfig, ServerConfig,
};
