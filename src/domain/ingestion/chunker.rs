//! Chunking strategy trait and types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::document::{DocumentKind, SourceDocument};
use crate::domain::DomainError;

/// Configuration for chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::validation(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// A bounded span of one source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Source document identifier
    pub source: String,
    pub kind: DocumentKind,
    /// Position within the source document (0-based)
    pub ordinal: usize,
    /// Character offset where this chunk starts
    pub char_start: usize,
    /// Character offset where this chunk ends (exclusive)
    pub char_end: usize,
    pub content: String,
}

impl Chunk {
    pub fn new(
        document: &SourceDocument,
        ordinal: usize,
        char_start: usize,
        char_end: usize,
        content: impl Into<String>,
    ) -> Self {
        Self {
            source: document.source.clone(),
            kind: document.kind,
            ordinal,
            char_start,
            char_end,
            content: content.into(),
        }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }
}

/// Trait for chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split one document into ordered chunks
    fn chunk(
        &self,
        document: &SourceDocument,
        config: &ChunkingConfig,
    ) -> Result<Vec<Chunk>, DomainError>;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}

/// Rebuild the original text from a chunk sequence by dropping the leading
/// overlap of every chunk after the first.
pub fn reassemble(chunks: &[Chunk], overlap: usize) -> String {
    let mut text = String::new();

    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            text.push_str(&chunk.content);
        } else {
            text.extend(chunk.content.chars().skip(overlap));
        }
    }

    text
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Mock chunking strategy that returns each document as one chunk
    #[derive(Debug, Default)]
    pub struct MockChunkingStrategy {
        error: Option<String>,
    }

    impl MockChunkingStrategy {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    impl ChunkingStrategy for MockChunkingStrategy {
        fn chunk(
            &self,
            document: &SourceDocument,
            _config: &ChunkingConfig,
        ) -> Result<Vec<Chunk>, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::internal(error));
            }

            if document.content.is_empty() {
                return Ok(vec![]);
            }

            let len = document.content.chars().count();
            Ok(vec![Chunk::new(document, 0, 0, len, &document.content)])
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }
}
