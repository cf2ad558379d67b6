use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Status,
    Transport,
    Io,
    InvalidLocation,
}

/// Failure to fetch a content fragment.
///
/// For day fragments every variant means "no content for this day" and is
/// recovered by rendering the fallback message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("content not found at '{path}'")]
    NotFound { path: String },
    #[error("content request for '{path}' failed with status {status}")]
    Status { path: String, status: u16 },
    #[error("transport error while fetching '{path}': {message}")]
    Transport { path: String, message: String },
    #[error("failed to read '{path}': {message}")]
    Io { path: String, message: String },
    #[error("cannot resolve content location '{path}': {message}")]
    InvalidLocation { path: String, message: String },
}

impl ContentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ContentError::NotFound { .. } => ErrorCode::NotFound,
            ContentError::Status { .. } => ErrorCode::Status,
            ContentError::Transport { .. } => ErrorCode::Transport,
            ContentError::Io { .. } => ErrorCode::Io,
            ContentError::InvalidLocation { .. } => ErrorCode::InvalidLocation,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ContentError::NotFound { path }
            | ContentError::Status { path, .. }
            | ContentError::Transport { path, .. }
            | ContentError::Io { path, .. }
            | ContentError::InvalidLocation { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
