//! PDF text extraction

use async_trait::async_trait;

use crate::domain::ingestion::DocumentParser;
use crate::domain::DomainError;

/// Parser extracting the text layer of PDF files
#[derive(Debug, Clone, Default)]
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PdfParser {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    async fn parse(&self, source: &str, bytes: Vec<u8>) -> Result<String, DomainError> {
        // Extraction is CPU bound and may panic on malformed files
        let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| DomainError::load(source, format!("PDF extraction aborted: {}", e)))?;

        extracted.map_err(|e| DomainError::load(source, format!("PDF extraction failed: {}", e)))
    }
}
