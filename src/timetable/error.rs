use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Timetable parse error: {0}")]
    ParseError(String),
}
