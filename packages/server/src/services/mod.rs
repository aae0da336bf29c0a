pub mod conversation;
pub mod error;
pub mod ingestion;
pub mod locks;
pub mod prompt;

pub use conversation::ConversationService;
pub use error::ServiceError;
pub use ingestion::{IngestionService, PdfFile};
pub use locks::DocumentLocks;
