//! Conversation logging collaborator

mod channel;
mod log;
mod record;

pub use channel::Channel;
pub use log::ConversationLog;
pub use record::{ConversationRecord, Role};

#[cfg(test)]
pub use log::MockConversationLog;
