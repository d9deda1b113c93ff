use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not read PDF: {0}")]
    Extract(String),

    /// The extractor panicked or the blocking task was cancelled.
    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Extracts plain text from an in-memory PDF.
///
/// Parsing is CPU-bound, so it runs on the blocking pool.
pub async fn extract_text(data: Bytes) -> Result<String, PdfError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data).map_err(|e| PdfError::Extract(format!("{e:?}")))
    })
    .await
    .map_err(|e| PdfError::Task(e.to_string()))?
}
