use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": ..., "code": ...}`; upstream-caused
/// server errors add `details`, contract violations add `raw`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    /// Upstream answered, but not in the shape we rely on.
    #[error("Upstream contract violation: {message}")]
    UpstreamContract { message: String, raw: Value },

    #[error("Upstream parse error: {0}")]
    UpstreamParse(String),

    #[error("Upstream transport error: {0}")]
    UpstreamTransport(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "VALIDATION_ERROR" }),
            ),
            AppError::Unauthorized(msg) => {
                tracing::warn!("Authentication failed: {msg}");
                (
                    StatusCode::UNAUTHORIZED,
                    json!({
                        "error": "Authentication failed",
                        "code": "UNAUTHORIZED",
                        "details": msg
                    }),
                )
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": "Upload exceeds the size limit", "code": "PAYLOAD_TOO_LARGE" }),
            ),
            AppError::UpstreamContract { message, raw } => {
                tracing::error!("Upstream contract violation: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": message,
                        "code": "UPSTREAM_CONTRACT_VIOLATION",
                        "raw": raw
                    }),
                )
            }
            AppError::UpstreamParse(msg) => {
                tracing::error!("Upstream parse error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Upstream returned invalid JSON",
                        "code": "UPSTREAM_PARSE_ERROR",
                        "details": msg
                    }),
                )
            }
            AppError::UpstreamTransport(msg) => {
                tracing::error!("Upstream transport error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Request to upstream provider failed",
                        "code": "UPSTREAM_TRANSPORT_ERROR",
                        "details": msg
                    }),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Text generation failed",
                        "code": "LLM_ERROR",
                        "details": msg
                    }),
                )
            }
            AppError::PdfExtraction(msg) => {
                tracing::error!("PDF extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to extract text from PDF",
                        "code": "PDF_EXTRACTION_ERROR",
                        "details": msg
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_400_with_error_string() {
        let (status, body) = render(AppError::Validation("missing title".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing title");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_contract_violation_is_502_and_echoes_raw() {
        let raw = json!({ "totalCount": 0, "message": "bad key" });
        let (status, body) = render(AppError::UpstreamContract {
            message: "no jobs".into(),
            raw: raw.clone(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["raw"], raw);
    }

    #[tokio::test]
    async fn test_transport_error_carries_details() {
        let (status, body) =
            render(AppError::UpstreamTransport("connection reset".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "connection reset");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unauthorized_is_401() {
        let (status, body) = render(AppError::Unauthorized("bad code".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_payload_too_large_is_413() {
        let (status, body) = render(AppError::PayloadTooLarge).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    }
}
