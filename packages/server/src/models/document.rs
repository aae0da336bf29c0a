use chrono::{DateTime, Utc};
use common::ProcessingStatus;
use serde::Serialize;

use crate::entity::{conversation_turn, document};

/// Characters of extracted text shown in listings.
pub const CONTENT_PREVIEW_CHARS: usize = 100;

/// Response DTO for upload and replace.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    #[schema(example = 1)]
    pub document_id: i32,
    /// Filename as sent by the client.
    #[schema(example = "report.pdf")]
    pub filename: String,
    pub processing_status: ProcessingStatus,
}

impl UploadResponse {
    pub fn new(model: &document::Model, original_name: String) -> Self {
        Self {
            document_id: model.id,
            filename: original_name,
            processing_status: model.processing_status,
        }
    }
}

/// Response DTO for a single document.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DocumentResponse {
    pub id: i32,
    /// Generated stored filename.
    #[schema(example = "3f2b9c1e8d7a4b6c9e0f1a2b3c4d5e6f.pdf")]
    pub filename: String,
    /// First 100 characters of the extracted text.
    #[schema(example = "Hello world")]
    pub content_preview: String,
    pub page_count: i32,
    pub updated_at: DateTime<Utc>,
    pub processing_status: ProcessingStatus,
}

impl From<document::Model> for DocumentResponse {
    fn from(model: document::Model) -> Self {
        Self {
            id: model.id,
            content_preview: model.content.chars().take(CONTENT_PREVIEW_CHARS).collect(),
            filename: model.filename,
            page_count: model.page_count,
            updated_at: model.updated_at,
            processing_status: model.processing_status,
        }
    }
}

/// Response DTO for one stored conversation turn.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TurnResponse {
    pub id: i32,
    pub user_query: String,
    pub assistant_response: String,
    pub created_at: DateTime<Utc>,
}

impl From<conversation_turn::Model> for TurnResponse {
    fn from(model: conversation_turn::Model) -> Self {
        Self {
            id: model.id,
            user_query: model.user_query,
            assistant_response: model.assistant_response,
            created_at: model.created_at,
        }
    }
}
