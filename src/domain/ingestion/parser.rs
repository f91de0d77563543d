//! Document parser trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for document parsers turning raw file bytes into text
#[async_trait]
pub trait DocumentParser: Send + Sync + Debug {
    /// Get supported file extensions (e.g., ["txt", "text"])
    fn supported_extensions(&self) -> &[&str];

    /// Extract the full text of a document
    ///
    /// `source` is only used for error reporting.
    async fn parse(&self, source: &str, bytes: Vec<u8>) -> Result<String, DomainError>;

    /// Check if this parser supports a given filename
    fn supports_file(&self, filename: &str) -> bool {
        let Some((_, ext)) = filename.rsplit_once('.') else {
            return false;
        };

        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}
