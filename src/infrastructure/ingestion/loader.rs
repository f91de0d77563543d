//! Filesystem document store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::factory::ParserFactory;
use super::parsers::PlainTextParser;
use crate::domain::ingestion::{
    DocumentKind, DocumentLoader, DocumentParser, LoadReport, SkippedFile, SourceDocument,
    UploadedFile,
};
use crate::domain::DomainError;

/// Loads the FAQ file plus every recognised file in the upload directory
#[derive(Debug, Clone)]
pub struct FsDocumentLoader {
    faq_path: Option<PathBuf>,
    faq_required: bool,
    upload_dir: PathBuf,
    parsers: Vec<Arc<dyn DocumentParser>>,
}

impl FsDocumentLoader {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            faq_path: None,
            faq_required: false,
            upload_dir: upload_dir.into(),
            parsers: ParserFactory::default_parsers(),
        }
    }

    pub fn with_faq(mut self, path: impl Into<PathBuf>, required: bool) -> Self {
        self.faq_path = Some(path.into());
        self.faq_required = required;
        self
    }

    pub fn with_parsers(mut self, parsers: Vec<Arc<dyn DocumentParser>>) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_upload_dir(&self) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| DomainError::load(self.upload_dir.display().to_string(), e.to_string()))
    }

    async fn load_faq(&self) -> Result<Option<SourceDocument>, DomainError> {
        let Some(ref path) = self.faq_path else {
            return Ok(None);
        };
        let source = path.display().to_string();

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound && !self.faq_required => {
                debug!(source = %source, "FAQ file not present, skipping");
                return Ok(None);
            }
            Err(e) => return Err(DomainError::load(source, e.to_string())),
        };

        let name = file_name(path);
        let text = match ParserFactory::for_filename(&self.parsers, &name) {
            Some(parser) => parser.parse(&source, bytes).await?,
            None => PlainTextParser::new().parse(&source, bytes).await?,
        };

        if text.trim().is_empty() {
            debug!(source = %source, "FAQ file is blank, skipping");
            return Ok(None);
        }

        Ok(Some(SourceDocument::new(source, DocumentKind::Faq, text)))
    }

    /// Recognised upload files, sorted by filename
    async fn upload_entries(&self) -> Result<Vec<(String, PathBuf, DocumentKind)>, DomainError> {
        self.ensure_upload_dir().await?;

        let dir_error =
            |e: std::io::Error| DomainError::load(self.upload_dir.display().to_string(), e.to_string());
        let mut dir = tokio::fs::read_dir(&self.upload_dir).await.map_err(dir_error)?;
        let mut entries = Vec::new();

        while let Some(entry) = dir.next_entry().await.map_err(dir_error)? {
            let path = entry.path();

            if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }

            if self.faq_path.as_deref() == Some(path.as_path()) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            match DocumentKind::from_filename(&name) {
                Some(kind) => entries.push((name, path, kind)),
                None => debug!(file = %name, "Ignoring unrecognised file"),
            }
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Reduce an uploaded filename to a safe basename
pub fn sanitize_filename(filename: &str) -> Result<String, DomainError> {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() {
        return Err(DomainError::validation(format!("Invalid filename: {:?}", filename)));
    }

    Ok(cleaned)
}

/// Stored name for an upload, rejecting types the loader cannot index
pub fn upload_name(filename: &str) -> Result<String, DomainError> {
    let name = sanitize_filename(filename)?;

    if DocumentKind::from_filename(&name).is_none() {
        return Err(DomainError::validation(format!(
            "Unsupported file type: {} (expected .pdf or .txt)",
            name
        )));
    }

    Ok(name)
}

#[async_trait]
impl DocumentLoader for FsDocumentLoader {
    async fn load_all(&self) -> Result<LoadReport, DomainError> {
        let mut report = LoadReport::default();

        if let Some(faq) = self.load_faq().await? {
            report.documents.push(faq);
        }

        for (name, path, kind) in self.upload_entries().await? {
            let source = path.display().to_string();

            let Some(parser) = ParserFactory::for_filename(&self.parsers, &name) else {
                debug!(file = %name, "No parser for file");
                continue;
            };

            let text = match tokio::fs::read(&path).await {
                Ok(bytes) => parser.parse(&source, bytes).await,
                Err(e) => Err(DomainError::load(&source, e.to_string())),
            };

            match text {
                Ok(text) if text.trim().is_empty() => {
                    debug!(source = %source, "Document has no text, skipping");
                    report.skipped.push(SkippedFile {
                        source,
                        reason: "no extractable text".to_string(),
                    });
                }
                Ok(text) => report.documents.push(SourceDocument::new(source, kind, text)),
                Err(e) => {
                    warn!(source = %source, error = %e, "Skipping unreadable document");
                    report.skipped.push(SkippedFile {
                        source,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            documents = report.documents.len(),
            skipped = report.skipped.len(),
            "Loaded document store"
        );

        Ok(report)
    }

    async fn store_upload(&self, filename: &str, bytes: Vec<u8>) -> Result<PathBuf, DomainError> {
        let name = upload_name(filename)?;

        self.ensure_upload_dir().await?;

        let target = self.upload_dir.join(&name);
        let temp = self.upload_dir.join(format!(".{}.upload.tmp", name));
        let storage_error = |e: std::io::Error| DomainError::storage(format!("{}: {}", name, e));

        tokio::fs::write(&temp, &bytes).await.map_err(storage_error)?;
        tokio::fs::rename(&temp, &target).await.map_err(storage_error)?;

        info!(file = %name, bytes = bytes.len(), "Stored uploaded document");
        Ok(target)
    }

    async fn list_uploads(&self) -> Result<Vec<UploadedFile>, DomainError> {
        let mut files = Vec::new();

        for (name, path, _) in self.upload_entries().await? {
            let metadata = tokio::fs::metadata(&path)
                .await
                .map_err(|e| DomainError::storage(format!("{}: {}", name, e)))?;

            files.push(UploadedFile {
                content_type: mime_guess::from_path(&path)
                    .first_or_octet_stream()
                    .to_string(),
                size_bytes: metadata.len(),
                modified_at: metadata.modified().ok().map(DateTime::<Utc>::from),
                filename: name,
            });
        }

        Ok(files)
    }
}
