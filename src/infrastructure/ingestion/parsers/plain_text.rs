//! Plain text document parser

use async_trait::async_trait;

use crate::domain::ingestion::DocumentParser;
use crate::domain::DomainError;

/// Parser for UTF-8 text files
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PlainTextParser {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    async fn parse(&self, source: &str, bytes: Vec<u8>) -> Result<String, DomainError> {
        String::from_utf8(bytes)
            .map_err(|e| DomainError::load(source, format!("Invalid UTF-8: {}", e)))
    }
}
