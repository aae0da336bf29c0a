use axum::Json;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::path::AppPath;
use crate::extractors::upload::PdfUpload;
use crate::models::document::{DocumentResponse, TurnResponse, UploadResponse};
use crate::repository::{ConversationRepository, DocumentRepository};
use crate::services::ServiceError;
use crate::state::AppState;

/// Body limit for upload routes: the configured file limit plus room for
/// multipart framing. Oversized files that fit the slack are rejected by validation.
pub fn upload_body_limit(max_size_mb: u64) -> DefaultBodyLimit {
    let bytes = max_size_mb.saturating_add(1).saturating_mul(1024 * 1024);
    DefaultBodyLimit::max(usize::try_from(bytes).unwrap_or(usize::MAX))
}

#[utoipa::path(
    post,
    path = "/documents",
    tag = "Documents",
    operation_id = "uploadDocument",
    summary = "Upload a PDF",
    description = "Stores the PDF, extracts and normalizes its text and creates a document. \
        The `file` multipart field is required and must be a `.pdf` within the size limit. \
        A PDF without extractable text is rejected and leaves nothing behind.",
    request_body(content_type = "multipart/form-data", description = "PDF upload"),
    responses(
        (status = 201, description = "Document created", body = UploadResponse),
        (status = 400, description = "Invalid upload (VALIDATION_ERROR, EXTRACTION_ERROR)", body = ErrorBody),
        (status = 500, description = "Storage or internal failure (STORAGE_ERROR, INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, upload), fields(filename = %upload.original_name))]
pub async fn upload_document(
    State(state): State<AppState>,
    PdfUpload(upload): PdfUpload,
) -> Result<impl IntoResponse, AppError> {
    let original_name = upload.original_name.clone();
    let document = state.ingestion.create(upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse::new(&document, original_name)),
    ))
}

#[utoipa::path(
    get,
    path = "/documents",
    tag = "Documents",
    operation_id = "listDocuments",
    summary = "List documents",
    description = "Returns every document, oldest first, with a 100 character content preview.",
    responses(
        (status = 200, description = "Document list", body = Vec<DocumentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentResponse>>, AppError> {
    let documents = DocumentRepository::new(&state.db).list().await?;
    Ok(Json(documents.into_iter().map(DocumentResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "Documents",
    operation_id = "getDocument",
    summary = "Get a document",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document", body = DocumentResponse),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_document(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = DocumentRepository::new(&state.db)
        .find(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;
    Ok(Json(DocumentResponse::from(document)))
}

#[utoipa::path(
    put,
    path = "/documents/{id}",
    tag = "Documents",
    operation_id = "replaceDocument",
    summary = "Replace a document's PDF",
    description = "Swaps in a new PDF for an existing document. The previous file is kept as a \
        backup until the record is updated, and restored if anything fails.",
    params(("id" = i32, Path, description = "Document ID")),
    request_body(content_type = "multipart/form-data", description = "PDF upload"),
    responses(
        (status = 200, description = "Document replaced", body = UploadResponse),
        (status = 400, description = "Invalid upload (VALIDATION_ERROR, EXTRACTION_ERROR)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage or internal failure (STORAGE_ERROR, INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, upload), fields(filename = %upload.original_name))]
pub async fn replace_document(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    PdfUpload(upload): PdfUpload,
) -> Result<Json<UploadResponse>, AppError> {
    let original_name = upload.original_name.clone();
    let document = state.ingestion.replace(id, upload).await?;
    Ok(Json(UploadResponse::new(&document, original_name)))
}

#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "Documents",
    operation_id = "deleteDocument",
    summary = "Delete a document",
    description = "Removes the stored file, the document and all of its conversation turns.",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_document(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    state.ingestion.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/documents/{id}/turns",
    tag = "Documents",
    operation_id = "listDocumentTurns",
    summary = "List a document's conversation",
    description = "Returns the stored question/answer turns of a document in the order they were created.",
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Conversation turns", body = Vec<TurnResponse>),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_turns(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<TurnResponse>>, AppError> {
    DocumentRepository::new(&state.db)
        .find(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;

    let turns = ConversationRepository::new(&state.db).history(id).await?;
    Ok(Json(turns.into_iter().map(TurnResponse::from).collect()))
}
