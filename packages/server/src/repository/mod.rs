mod conversation;
mod document;

pub use conversation::ConversationRepository;
pub use document::{DocumentRepository, NewDocument};
