//! Factory for document parsers

use std::sync::Arc;

use crate::domain::ingestion::DocumentParser;

use super::parsers::{PdfParser, PlainTextParser};

/// Factory for creating document parsers
#[derive(Debug, Default)]
pub struct ParserFactory;

impl ParserFactory {
    /// Every parser the document store understands
    pub fn default_parsers() -> Vec<Arc<dyn DocumentParser>> {
        vec![Arc::new(PlainTextParser::new()), Arc::new(PdfParser::new())]
    }

    /// Pick the parser for a filename, if any supports it
    pub fn for_filename<'a>(
        parsers: &'a [Arc<dyn DocumentParser>],
        filename: &str,
    ) -> Option<&'a Arc<dyn DocumentParser>> {
        parsers.iter().find(|p| p.supports_file(filename))
    }
}
