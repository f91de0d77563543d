//! Knowledge base manager - Loader -> Chunker -> Embedder -> Index orchestration

use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::domain::ingestion::{
    Chunk, ChunkingConfig, ChunkingStrategy, DocumentLoader, SkippedFile, UploadedFile,
};
use crate::domain::DomainError;
use crate::infrastructure::index::VectorIndex;
use crate::infrastructure::observability::record_rebuild;

/// Summary of a rebuild that published a new index
#[derive(Debug, Clone, Serialize)]
pub struct RebuildStats {
    pub documents: usize,
    pub chunks: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub fingerprint: String,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// What a rebuild request ended up doing
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RebuildOutcome {
    /// A new index was built and published
    Rebuilt(RebuildStats),
    /// The document store had no content; the existing index was kept
    SkippedEmpty,
    /// A rebuild that started after this request already covered it
    Coalesced,
}

impl RebuildOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rebuilt(_) => "rebuilt",
            Self::SkippedEmpty => "skipped_empty",
            Self::Coalesced => "coalesced",
        }
    }
}

/// Sole mutation entry point for the vector index.
///
/// Rebuilds run one at a time. A caller that queued behind a running rebuild
/// returns `Coalesced` once a rebuild that started after its request succeeds.
#[derive(Debug)]
pub struct KnowledgeBaseManager {
    loader: Arc<dyn DocumentLoader>,
    chunker: Arc<dyn ChunkingStrategy>,
    chunking: ChunkingConfig,
    index: Arc<VectorIndex>,
    rebuild_lock: Mutex<()>,
    /// Number of rebuilds started so far
    started: AtomicU64,
    /// Start number of the newest successful rebuild
    last_success: AtomicU64,
}

impl KnowledgeBaseManager {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        chunker: Arc<dyn ChunkingStrategy>,
        chunking: ChunkingConfig,
        index: Arc<VectorIndex>,
    ) -> Result<Self, DomainError> {
        chunking.validate()?;

        Ok(Self {
            loader,
            chunker,
            chunking,
            index,
            rebuild_lock: Mutex::new(()),
            started: AtomicU64::new(0),
            last_success: AtomicU64::new(0),
        })
    }

    pub fn index(&self) -> &Arc<VectorIndex> {
        &self.index
    }

    /// Store an uploaded file. Call `rebuild` afterwards to index it.
    pub async fn store_upload(&self, filename: &str, bytes: Vec<u8>) -> Result<PathBuf, DomainError> {
        self.loader.store_upload(filename, bytes).await
    }

    pub async fn list_uploads(&self) -> Result<Vec<UploadedFile>, DomainError> {
        self.loader.list_uploads().await
    }

    /// Rebuild the whole index from the document store
    #[instrument(skip(self))]
    pub async fn rebuild(&self) -> Result<RebuildOutcome, DomainError> {
        let seen = self.started.load(Ordering::SeqCst);
        let start = Instant::now();
        let _guard = self.rebuild_lock.lock().await;

        if self.last_success.load(Ordering::SeqCst) > seen {
            debug!("Rebuild already covered by a newer run");
            record_rebuild("coalesced", start.elapsed());
            return Ok(RebuildOutcome::Coalesced);
        }

        let epoch = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.run().await;

        match &result {
            Ok(outcome) => {
                self.last_success.store(epoch, Ordering::SeqCst);
                record_rebuild(outcome.label(), start.elapsed());
            }
            Err(e) => {
                error!(error = %e, "Knowledge base rebuild failed, keeping previous index");
                record_rebuild("failed", start.elapsed());
            }
        }

        result
    }

    async fn run(&self) -> Result<RebuildOutcome, DomainError> {
        let start = Instant::now();
        let report = self.loader.load_all().await?;

        let mut chunks: Vec<Chunk> = Vec::new();
        for document in &report.documents {
            let pieces = self.chunker.chunk(document, &self.chunking)?;
            debug!(source = %document.source, chunks = pieces.len(), "Chunked document");
            chunks.extend(pieces.into_iter().filter(|c| !c.content.trim().is_empty()));
        }

        if chunks.is_empty() {
            info!(
                skipped = report.skipped.len(),
                "Document store is empty, keeping existing index"
            );
            return Ok(RebuildOutcome::SkippedEmpty);
        }

        let snapshot = self.index.rebuild(chunks).await?;

        let stats = RebuildStats {
            documents: report.documents.len(),
            chunks: snapshot.len(),
            skipped_files: report.skipped,
            fingerprint: snapshot.fingerprint.clone(),
            duration: start.elapsed(),
        };

        info!(
            documents = stats.documents,
            chunks = stats.chunks,
            skipped = stats.skipped_files.len(),
            fingerprint = %stats.fingerprint,
            duration_ms = stats.duration.as_millis() as u64,
            "Knowledge base rebuilt"
        );

        Ok(RebuildOutcome::Rebuilt(stats))
    }
}
