pub mod json;
pub mod path;
pub mod upload;

use crate::error::AppError;

/// Turn an axum extractor rejection into a `VALIDATION_ERROR`.
fn rejected(part: &'static str, detail: String) -> AppError {
    tracing::debug!(part, %detail, "Request rejected");
    AppError::Validation(detail)
}
