use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum TamefilesError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
impl TamefilesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TamefilesError::Io {
            path: path.into(),
            source,
        }
    }
}
