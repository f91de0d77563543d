//! Vector index domain types

mod snapshot;
mod store;

pub use snapshot::{fingerprint, IndexEntry, IndexSnapshot, IndexStatus, SearchHit};
pub use store::IndexStore;
