//! Error bodies and cache validators.

use crate::error::ApiError;
use axum::http::header::IF_NONE_MATCH;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use tracing::{error, warn};

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::PathNotInTree(_) | ApiError::ContentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ContentFetchFailed { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::StorageError(_)
            | ApiError::DecodeFailed { .. }
            | ApiError::ConfigError(_)
            | ApiError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }

        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.to_string()));
        if let Some(subject) = self.subject() {
            let key = match self {
                ApiError::ContentFetchFailed { .. } => "url",
                _ => "path",
            };
            body.insert(key.to_string(), Value::String(subject.to_string()));
        }
        (status, Json(Value::Object(body))).into_response()
    }
}

/// Quoted entity tag for a hex digest
pub fn entity_tag(hex: &str) -> String {
    format!("\"{}\"", hex)
}

/// Whether `If-None-Match` already names `etag`
pub fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|candidate| candidate.trim().trim_start_matches("W/"))
        .any(|candidate| candidate == "*" || candidate == etag)
}

/// Run store scans and tree builds off the async workers
pub async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

pub fn service_info() -> Value {
    json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })
}
