//! Immutable index snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::embedding::dot_product;
use crate::domain::ingestion::Chunk;

/// A chunk paired with its unit-length embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// A fully built index, published as a whole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub entries: Vec<IndexEntry>,
    /// Embedding model that produced every vector
    pub embedding_model: String,
    pub dimensions: usize,
    /// Content hash of the chunk set
    pub fingerprint: String,
    pub built_at: DateTime<Utc>,
}

impl IndexSnapshot {
    pub fn new(entries: Vec<IndexEntry>, embedding_model: impl Into<String>, dimensions: usize) -> Self {
        let fingerprint = fingerprint(entries.iter().map(|e| &e.chunk));

        Self {
            entries,
            embedding_model: embedding_model.into(),
            dimensions,
            fingerprint,
            built_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top `k` entries by similarity, highest first.
    ///
    /// Equal scores keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit> {
        if k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, dot_product(query, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(i, score)| SearchHit {
                chunk: self.entries[i].chunk.clone(),
                score,
            })
            .collect()
    }
}

/// SHA-256 over chunk sources and texts, in order
pub fn fingerprint<'a>(chunks: impl IntoIterator<Item = &'a Chunk>) -> String {
    let mut hasher = Sha256::new();

    for chunk in chunks {
        hasher.update(chunk.source.as_bytes());
        hasher.update([0u8]);
        hasher.update(chunk.content.as_bytes());
        hasher.update([0u8]);
    }

    hex::encode(hasher.finalize())
}

/// One search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub chunk: Chunk,
    /// Cosine similarity (-1.0 - 1.0, higher is more similar)
    pub score: f32,
}

/// Readiness summary of the published index
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStatus {
    pub ready: bool,
    pub chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<DateTime<Utc>>,
}

impl IndexStatus {
    pub fn of(snapshot: Option<&IndexSnapshot>) -> Self {
        match snapshot {
            Some(s) => Self {
                ready: !s.is_empty(),
                chunks: s.len(),
                fingerprint: Some(s.fingerprint.clone()),
                built_at: Some(s.built_at),
            },
            None => Self::default(),
        }
    }
}
