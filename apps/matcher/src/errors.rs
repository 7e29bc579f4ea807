use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::postings::source::SourceError;

/// Errors raised by the ranking core.
///
/// All of them are deterministic for identical input; nothing here is retried locally.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("No postings available")]
    EmptyCorpus,

    #[error("Vector space has not been fitted yet")]
    NotFitted,

    #[error("Vector built in space {found} cannot be scored against space {expected}")]
    VocabularyMismatch { expected: Uuid, found: Uuid },

    #[error("No structured data available: {0}")]
    UpstreamExtractionFailure(String),

    #[error("Posting source error: {0}")]
    Source(#[from] SourceError),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No postings available")]
    NoPostings,

    #[error("Index not ready")]
    NotReady,

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::EmptyCorpus => AppError::NoPostings,
            MatchError::NotFitted => AppError::NotReady,
            MatchError::UpstreamExtractionFailure(msg) => AppError::ExtractionFailed(msg),
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NoPostings => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NO_POSTINGS",
                "No postings available".to_string(),
            ),
            AppError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_READY",
                "The posting index has not been built yet".to_string(),
            ),
            AppError::ExtractionFailed(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_FAILED",
                    "No structured data available for this resume".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
