//! JSON file index store

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::index::{IndexSnapshot, IndexStore};
use crate::domain::DomainError;

const INDEX_FILE: &str = "index.json";
const TEMP_FILE: &str = "index.json.tmp";

/// Persists the snapshot as `<dir>/index.json`, replaced via rename
#[derive(Debug, Clone)]
pub struct FileIndexStore {
    dir: PathBuf,
}

impl FileIndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn error(path: &Path, e: impl std::fmt::Display) -> DomainError {
        DomainError::storage(format!("{}: {}", path.display(), e))
    }
}

#[async_trait]
impl IndexStore for FileIndexStore {
    async fn load(&self) -> Result<Option<IndexSnapshot>, DomainError> {
        let path = self.index_path();

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::error(&path, e)),
        };

        let snapshot: IndexSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| Self::error(&path, e))?;

        debug!(path = %path.display(), chunks = snapshot.len(), "Loaded persisted index");
        Ok(Some(snapshot))
    }

    async fn persist(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::error(&self.dir, e))?;

        let temp = self.dir.join(TEMP_FILE);
        let target = self.index_path();
        let bytes = serde_json::to_vec(snapshot).map_err(|e| Self::error(&target, e))?;

        tokio::fs::write(&temp, bytes)
            .await
            .map_err(|e| Self::error(&temp, e))?;
        tokio::fs::rename(&temp, &target)
            .await
            .map_err(|e| Self::error(&target, e))?;

        debug!(path = %target.display(), chunks = snapshot.len(), "Persisted index");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
