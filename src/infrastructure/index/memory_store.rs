use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::index::{IndexSnapshot, IndexStore};
use crate::domain::DomainError;

/// Index store that keeps the snapshot in process memory
#[derive(Debug, Default)]
pub struct InMemoryIndexStore {
    snapshot: RwLock<Option<IndexSnapshot>>,
}

impl InMemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IndexStore for InMemoryIndexStore {
    async fn load(&self) -> Result<Option<IndexSnapshot>, DomainError> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn persist(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError> {
        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
