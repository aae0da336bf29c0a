use common::extract::ExtractionError;
use common::storage::StorageError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::llm::GenerationError;

/// Errors raised by the ingestion and conversation pipelines.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Document with ID {0} not found.")]
    NotFound(i32),
    #[error("Document with ID {0} has no extracted content.")]
    EmptyContent(i32),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("{0}")]
    Internal(String),
}
