//! Vector index and snapshot stores

mod file_store;
mod memory_store;
mod vector_index;

pub use file_store::FileIndexStore;
pub use memory_store::InMemoryIndexStore;
pub use vector_index::VectorIndex;
