//! Application services

mod answering_engine;
mod knowledge_base_manager;

#[cfg(test)]
mod scenarios;

pub use answering_engine::{AnsweringConfig, AnsweringEngine};
pub use knowledge_base_manager::{KnowledgeBaseManager, RebuildOutcome, RebuildStats};
