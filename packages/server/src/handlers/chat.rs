use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    operation_id = "chat",
    summary = "Ask a question about a document",
    description = "Builds a prompt from the document's conversation history, the query and \
        (unless `text_only` is set) the full document text, asks the model and stores the turn.",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model response", body = ChatResponse),
        (status = 400, description = "Bad request (VALIDATION_ERROR, EMPTY_CONTENT)", body = ErrorBody),
        (status = 404, description = "Document not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Model failure (MODEL_RATE_LIMITED, MODEL_TIMEOUT, MODEL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(document_id = payload.document_id, text_only = payload.text_only))]
pub async fn chat(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = state
        .conversation
        .generate_response(payload.document_id, &payload.query, !payload.text_only)
        .await?;
    Ok(Json(ChatResponse { response }))
}
