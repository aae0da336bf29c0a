use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::llm::GenerationError;
use crate::services::ServiceError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `EXTRACTION_ERROR`, `EMPTY_CONTENT`, `STORAGE_ERROR`,
    /// `MODEL_RATE_LIMITED`, `MODEL_TIMEOUT`, `MODEL_ERROR`, `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Document with ID 999 not found.")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Extraction(String),
    EmptyContent(String),
    /// Disk failure. Detail is logged, not returned.
    Storage(String),
    ModelRateLimited(String),
    ModelTimeout(String),
    Model(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Extraction(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "EXTRACTION_ERROR",
                    message: msg,
                },
            ),
            AppError::EmptyContent(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "EMPTY_CONTENT",
                    message: msg,
                },
            ),
            AppError::Storage(detail) => {
                tracing::error!("Storage error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "STORAGE_ERROR",
                        message: "Failed to store the uploaded file".into(),
                    },
                )
            }
            AppError::ModelRateLimited(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: "MODEL_RATE_LIMITED",
                    message: msg,
                },
            ),
            AppError::ModelTimeout(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    code: "MODEL_TIMEOUT",
                    message: msg,
                },
            ),
            AppError::Model(detail) => {
                tracing::error!("Model error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "MODEL_ERROR",
                        message: "The language model failed to produce a response".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::NotFound(_) => AppError::NotFound(err.to_string()),
            ServiceError::EmptyContent(_) => AppError::EmptyContent(err.to_string()),
            ServiceError::Extraction(e) => AppError::Extraction(e.to_string()),
            ServiceError::Storage(e) => AppError::Storage(e.to_string()),
            ServiceError::Generation(e) => match e {
                GenerationError::RateLimitExceeded { .. } => {
                    AppError::ModelRateLimited(e.to_string())
                }
                GenerationError::Timeout { .. } => AppError::ModelTimeout(e.to_string()),
                GenerationError::Model(detail) => AppError::Model(detail),
            },
            ServiceError::Database(e) => AppError::Internal(e.to_string()),
            ServiceError::Internal(detail) => AppError::Internal(detail),
        }
    }
}
