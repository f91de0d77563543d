//! Domain layer - Core business logic and entities

pub mod answer;
pub mod conversation;
pub mod embedding;
pub mod error;
pub mod index;
pub mod ingestion;
pub mod llm;

pub use answer::{Answer, AnswerRequest, FALLBACK_ANSWER};
pub use conversation::{Channel, ConversationLog, ConversationRecord, Role};
pub use embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::{DomainError, GenerationFailure};
pub use index::{IndexEntry, IndexSnapshot, IndexStatus, IndexStore, SearchHit};
pub use ingestion::{
    Chunk, ChunkingConfig, ChunkingStrategy, DocumentKind, DocumentLoader, DocumentParser,
    LoadReport, SkippedFile, SourceDocument, UploadedFile,
};
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
