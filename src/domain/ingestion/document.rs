//! Source documents read from the document store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// The canonical FAQ text file
    Faq,
    /// A PDF placed in the upload directory
    UploadedPdf,
    /// A plain text file placed in the upload directory
    UploadedText,
}

impl DocumentKind {
    /// Resolve the upload kind from a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::UploadedPdf),
            "txt" | "text" => Some(Self::UploadedText),
            _ => None,
        }
    }

    /// Resolve the upload kind from a filename
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::UploadedPdf => "uploaded-pdf",
            Self::UploadedText => "uploaded-text",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named source of text loaded for one index build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File path or logical name
    pub source: String,
    pub kind: DocumentKind,
    /// Full extracted text
    pub content: String,
}

impl SourceDocument {
    pub fn new(source: impl Into<String>, kind: DocumentKind, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind,
            content: content.into(),
        }
    }
}

/// A file that was skipped while loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub source: String,
    pub reason: String,
}

/// Everything a load pass produced
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub documents: Vec<SourceDocument>,
    pub skipped: Vec<SkippedFile>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// A file stored in the upload directory
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    pub filename: String,
    pub size_bytes: u64,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(
            DocumentKind::from_filename("manual.pdf"),
            Some(DocumentKind::UploadedPdf)
        );
        assert_eq!(
            DocumentKind::from_filename("REPORT.PDF"),
            Some(DocumentKind::UploadedPdf)
        );
        assert_eq!(
            DocumentKind::from_filename("notes.txt"),
            Some(DocumentKind::UploadedText)
        );
        assert_eq!(DocumentKind::from_filename("image.png"), None);
        assert_eq!(DocumentKind::from_filename("README"), None);
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&DocumentKind::UploadedPdf).unwrap(),
            "\"uploaded-pdf\""
        );
        assert_eq!(DocumentKind::Faq.to_string(), "faq");
    }
}
