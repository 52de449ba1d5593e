use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Illegal file path")]
    Forbidden,
    #[error("File not found")]
    NotFound,
    #[error("Requested range not satisfiable")]
    RangeNotSatisfiable { size: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Thumbnail generation failed: {0}")]
    Thumbnail(String),
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        match self {
            MediaError::Forbidden => {
                (StatusCode::FORBIDDEN, "Illegal file path").into_response()
            }
            MediaError::NotFound => (StatusCode::NOT_FOUND, "File not found").into_response(),
            MediaError::RangeNotSatisfiable { size } => (
                StatusCode::RANGE_NOT_SATISFIABLE,
                [(header::CONTENT_RANGE, format!("bytes */{size}"))],
                "Requested range not satisfiable",
            )
                .into_response(),
            MediaError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                (StatusCode::NOT_FOUND, "File not found").into_response()
            }
            MediaError::Io(e) => {
                tracing::error!(error = %e, "IO error while serving media");
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error").into_response()
            }
            MediaError::Thumbnail(msg) => {
                tracing::error!(error = %msg, "Thumbnail generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Thumbnail generation failed",
                )
                    .into_response()
            }
        }
    }
}
