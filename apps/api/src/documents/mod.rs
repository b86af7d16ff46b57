//! Text extraction for uploaded resumes.

use bytes::Bytes;
use tracing::error;

use crate::errors::AppError;

/// Only files named `*.pdf` (any case) are extracted; everything else is skipped upstream.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// Extracts and trims the text of a PDF. Parsing is CPU-bound, so it runs on
/// the blocking pool.
///
/// An unreadable PDF fails the request. A readable PDF with no text yields an
/// empty string, which the matcher reports as insufficient content.
pub async fn extract_pdf_text(filename: &str, data: Bytes) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| {
            if e.is_panic() {
                // pdf-extract panics on some malformed documents
                extraction_failed(filename, "parser panicked")
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            }
        })?;
    let text = extracted.map_err(|e| extraction_failed(filename, &e.to_string()))?;

    Ok(text.trim().to_string())
}

fn extraction_failed(filename: &str, reason: &str) -> AppError {
    error!(filename, "Failed to extract text from PDF: {reason}");
    AppError::Extraction(format!("Failed to extract text from {filename}: {reason}"))
}
