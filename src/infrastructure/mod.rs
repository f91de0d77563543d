//! Infrastructure layer - External service implementations

pub mod conversation;
pub mod embedding;
pub mod http_client;
pub mod index;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod services;
