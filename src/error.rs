//! Error types
//!
//! `StorageError` covers the record store; `ApiError` is what the HTTP surface
//! and the CLI see. Expected outcomes such as a navigation miss are not errors
//! inside the tree engine and only become `PathNotInTree` at the boundary.

use thiserror::Error;

/// Record store failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("corrupt record for {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("invalid record path: {0:?}")]
    InvalidPath(String),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(io) => StorageError::IoError(io),
            other => StorageError::Unavailable(other.to_string()),
        }
    }
}

/// Errors surfaced to the HTTP layer and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("path not found in tree: {0}")]
    PathNotInTree(String),

    #[error("content not found: {0}")]
    ContentNotFound(String),

    #[error("content fetch failed for {target}: {reason}")]
    ContentFetchFailed {
        target: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("failed to decode image {path}: {reason}")]
    DecodeFailed { path: String, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        let reason = if err.is_panic() { "panicked" } else { "cancelled" };
        ApiError::TaskFailed(format!("blocking task {}: {}", reason, err))
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Path or URL the error refers to, if any
    pub fn subject(&self) -> Option<&str> {
        match self {
            ApiError::PathNotInTree(path)
            | ApiError::ContentNotFound(path)
            | ApiError::DecodeFailed { path, .. } => Some(path),
            ApiError::ContentFetchFailed { target, .. } => Some(target),
            ApiError::StorageError(StorageError::Corrupt { path, .. })
            | ApiError::StorageError(StorageError::InvalidPath(path)) => Some(path),
            _ => None,
        }
    }
}
