pub mod config;
pub mod document_status;
pub mod extract;
pub mod retry;
pub mod storage;

pub use document_status::ProcessingStatus;
