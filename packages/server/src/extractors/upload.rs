use axum::extract::{FromRequest, Multipart, Request};

use crate::error::AppError;
use crate::services::PdfFile;

/// The `file` field of a multipart upload, read fully into memory.
pub struct PdfUpload(pub PdfFile);

impl<S> FromRequest<S> for PdfUpload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            if field.name() != Some("file") {
                continue; // Ignore unknown fields.
            }

            let original_name = field
                .file_name()
                .map(str::to_owned)
                .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

            return Ok(PdfUpload(PdfFile {
                original_name,
                data: data.to_vec(),
            }));
        }

        Err(AppError::Validation("Missing 'file' field".into()))
    }
}
