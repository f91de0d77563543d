//! Copy-and-swap vector index

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::index::{IndexEntry, IndexSnapshot, IndexStatus, IndexStore, SearchHit};
use crate::domain::ingestion::Chunk;
use crate::domain::DomainError;
use crate::infrastructure::embedding::Embedder;
use crate::infrastructure::observability::{record_search, set_index_chunks};

/// Brute-force cosine index over unit vectors.
///
/// Readers clone the published `Arc` and never hold the lock while scoring.
/// A rebuild embeds and persists off to the side and only then swaps the
/// pointer, so a failed rebuild leaves the previous snapshot in place.
#[derive(Debug)]
pub struct VectorIndex {
    embedder: Embedder,
    store: Arc<dyn IndexStore>,
    current: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl VectorIndex {
    pub fn new(embedder: Embedder, store: Arc<dyn IndexStore>) -> Self {
        Self {
            embedder,
            store,
            current: RwLock::new(None),
        }
    }

    pub fn embedder(&self) -> &Embedder {
        &self.embedder
    }

    /// Currently published snapshot
    pub async fn snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.current.read().await.clone()
    }

    pub async fn status(&self) -> IndexStatus {
        IndexStatus::of(self.snapshot().await.as_deref())
    }

    /// Publish the persisted snapshot if it was built with the current embedder.
    ///
    /// Returns whether a snapshot was published.
    pub async fn restore(&self) -> Result<bool, DomainError> {
        let Some(snapshot) = self.store.load().await? else {
            debug!(store = self.store.name(), "No persisted index to restore");
            return Ok(false);
        };

        if snapshot.embedding_model != self.embedder.model() {
            warn!(
                persisted = %snapshot.embedding_model,
                current = %self.embedder.model(),
                "Persisted index uses a different embedding model, ignoring it"
            );
            return Ok(false);
        }

        if let Some(dims) = self.embedder.dimensions() {
            if dims != snapshot.dimensions {
                warn!(
                    persisted = snapshot.dimensions,
                    current = dims,
                    "Persisted index has different dimensions, ignoring it"
                );
                return Ok(false);
            }
        }

        info!(chunks = snapshot.len(), fingerprint = %snapshot.fingerprint, "Restored persisted index");
        self.publish(Arc::new(snapshot)).await;
        Ok(true)
    }

    /// Embed every chunk and replace the whole index
    pub async fn rebuild(&self, chunks: Vec<Chunk>) -> Result<Arc<IndexSnapshot>, DomainError> {
        if chunks.is_empty() {
            return Err(DomainError::index_empty("refusing to publish an index without chunks"));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed_all(&texts).await?;
        let dimensions = vectors.first().map(Vec::len).unwrap_or_default();

        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();
        let snapshot = Arc::new(IndexSnapshot::new(entries, self.embedder.model(), dimensions));

        self.store.persist(&snapshot).await?;
        self.publish(snapshot.clone()).await;

        Ok(snapshot)
    }

    async fn publish(&self, snapshot: Arc<IndexSnapshot>) {
        set_index_chunks(snapshot.len());
        *self.current.write().await = Some(snapshot);
    }

    /// Top `k` chunks by cosine similarity to a unit query vector
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, DomainError> {
        let snapshot = self
            .snapshot()
            .await
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DomainError::index_empty("no index has been built yet"))?;

        record_search();
        Ok(snapshot.search(query, k))
    }
}
