use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Client-correctable failures (bad type/size, empty text, missing ids) map
/// to 4xx; extraction and provider failures map to 5xx with the detail kept
/// in the body's `message` field.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid file type. Please upload a PDF, DOCX, or TXT file.")]
    UnsupportedType,

    #[error("File too large. Maximum size is 10MB.")]
    FileTooLarge,

    #[error("Could not extract text from the uploaded file. Please ensure it contains readable text.")]
    NoReadableText,

    #[error("Document extraction failed: {0}")]
    MalformedDocument(String),

    #[error("Failed to parse resume with AI: {0}")]
    AiParsing(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::UnsupportedType | AppError::FileTooLarge | AppError::NoReadableText => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::MalformedDocument(msg) => {
                tracing::error!("Document extraction error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::AiParsing(msg) => {
                tracing::error!("AI parsing error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "message": message }));

        (status, body).into_response()
    }
}
