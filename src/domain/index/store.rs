//! Persistence for index snapshots

use async_trait::async_trait;
use std::fmt::Debug;

use super::IndexSnapshot;
use crate::domain::DomainError;

/// Durable location for the published index
#[async_trait]
pub trait IndexStore: Send + Sync + Debug {
    /// Load the last persisted snapshot, if any
    async fn load(&self) -> Result<Option<IndexSnapshot>, DomainError>;

    /// Replace the persisted snapshot as a single step
    async fn persist(&self, snapshot: &IndexSnapshot) -> Result<(), DomainError>;

    /// Get the store name
    fn name(&self) -> &'static str;
}
