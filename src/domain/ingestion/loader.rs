//! Document store access

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;

use super::document::{LoadReport, UploadedFile};
use crate::domain::DomainError;

/// A readable (and writable by admins) document store
#[async_trait]
pub trait DocumentLoader: Send + Sync + Debug {
    /// Load every loadable document currently in the store
    async fn load_all(&self) -> Result<LoadReport, DomainError>;

    /// Store an uploaded file, replacing any file with the same name
    async fn store_upload(&self, filename: &str, bytes: Vec<u8>) -> Result<PathBuf, DomainError>;

    /// List files in the upload area
    async fn list_uploads(&self) -> Result<Vec<UploadedFile>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::ingestion::{DocumentKind, SourceDocument};
    use std::sync::Mutex;

    /// In-memory document store for testing
    #[derive(Debug, Default)]
    pub struct MockDocumentLoader {
        documents: Mutex<Vec<SourceDocument>>,
        error: Mutex<Option<String>>,
    }

    impl MockDocumentLoader {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_document(self, document: SourceDocument) -> Self {
            self.add_document(document);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.set_error(Some(error.into()));
            self
        }

        pub fn add_document(&self, document: SourceDocument) {
            let mut documents = self.documents.lock().unwrap();
            documents.retain(|d| d.source != document.source);
            documents.push(document);
        }

        pub fn clear(&self) {
            self.documents.lock().unwrap().clear();
        }

        pub fn set_error(&self, error: Option<String>) {
            *self.error.lock().unwrap() = error;
        }
    }

    #[async_trait]
    impl DocumentLoader for MockDocumentLoader {
        async fn load_all(&self) -> Result<LoadReport, DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::load("mock", error));
            }

            Ok(LoadReport {
                documents: self.documents.lock().unwrap().clone(),
                skipped: vec![],
            })
        }

        async fn store_upload(
            &self,
            filename: &str,
            bytes: Vec<u8>,
        ) -> Result<PathBuf, DomainError> {
            let kind = DocumentKind::from_filename(filename).ok_or_else(|| {
                DomainError::validation(format!("Unsupported file type: {}", filename))
            })?;

            let content = String::from_utf8(bytes)
                .map_err(|e| DomainError::load(filename, e.to_string()))?;
            self.add_document(SourceDocument::new(filename, kind, content));

            Ok(PathBuf::from(filename))
        }

        async fn list_uploads(&self) -> Result<Vec<UploadedFile>, DomainError> {
            Ok(self
                .documents
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.kind != DocumentKind::Faq)
                .map(|d| UploadedFile {
                    filename: d.source.clone(),
                    size_bytes: d.content.len() as u64,
                    content_type: "text/plain".to_string(),
                    modified_at: None,
                })
                .collect())
        }
    }
}
