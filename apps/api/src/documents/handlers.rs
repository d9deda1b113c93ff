use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::documents::pdf::extract_text;
use crate::errors::AppError;

/// Multipart field the upload must arrive under.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub text: String,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
    }
}

/// POST /api/extract-pdf-text
pub async fn handle_extract_pdf_text(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut upload: Option<Bytes> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::Validation(format!(
                "Exactly one '{FILE_FIELD}' upload is allowed"
            )));
        }
        upload = Some(field.bytes().await.map_err(multipart_error)?);
    }

    let data = upload
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    info!("Extracting text from {} byte PDF", data.len());

    let text = extract_text(data)
        .await
        .map_err(|e| AppError::PdfExtraction(e.to_string()))?;

    Ok(Json(ExtractTextResponse { text }))
}
