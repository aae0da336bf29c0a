use std::path::Path;

use lopdf::Document;
use thiserror::Error;
use tracing::debug;

/// Plain text pulled out of a PDF, plus the number of pages that were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub content: String,
    pub page_count: u32,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The bytes could not be parsed as a PDF.
    #[error("Error extracting text from PDF: {0}")]
    Unreadable(String),
    /// The PDF parsed but no page produced any text (scanned, image-only, or empty).
    #[error("No text found in the PDF.")]
    NoText,
    #[error("Error extracting text from PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns PDF bytes into plain text. Implementations are synchronous and may
/// be CPU heavy; async callers should run them on a blocking thread.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError>;

    fn extract_file(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let bytes = std::fs::read(path)?;
        self.extract(&bytes)
    }
}

/// [`TextExtractor`] backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl TextExtractor for LopdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let document =
            Document::load_mem(bytes).map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

        let pages = document.get_pages();
        let page_count = pages.len() as u32;

        let mut texts = Vec::with_capacity(pages.len());
        for page_no in pages.keys() {
            match document.extract_text(&[*page_no]) {
                Ok(text) if !text.trim().is_empty() => texts.push(text),
                Ok(_) => debug!(page = page_no, "Page produced no text"),
                Err(e) => debug!(page = page_no, error = %e, "Skipping unreadable page"),
            }
        }

        let content = texts.join(" ").trim().to_string();
        if content.is_empty() {
            return Err(ExtractionError::NoText);
        }

        Ok(ExtractedText {
            content,
            page_count,
        })
    }
}

/// Collapse whitespace runs to a single space, then keep only ASCII letters,
/// digits, spaces and `, . ? !`.
///
/// This is lossy: accented letters, non-Latin scripts and most punctuation
/// are dropped.
pub fn normalize_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | '?' | '!' | ' '))
        .collect::<String>()
        .trim()
        .to_string()
}
