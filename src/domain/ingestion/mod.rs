//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `DocumentLoader` trait for reading the document store
//! - `DocumentParser` trait for extracting text from files
//! - `ChunkingStrategy` trait for splitting documents into chunks

pub mod chunker;
pub mod document;
pub mod loader;
pub mod parser;

pub use chunker::{reassemble, Chunk, ChunkingConfig, ChunkingStrategy};
pub use document::{DocumentKind, LoadReport, SkippedFile, SourceDocument, UploadedFile};
pub use loader::DocumentLoader;
pub use parser::DocumentParser;

// Re-export mocks for testing
#[cfg(test)]
pub use chunker::mock::MockChunkingStrategy;
#[cfg(test)]
pub use loader::mock::MockDocumentLoader;
#[cfg(test)]
pub use parser::mock::MockDocumentParser;
