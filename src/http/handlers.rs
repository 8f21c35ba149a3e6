use super::response::{blocking, entity_tag, etag_matches, service_info};
use super::AppState;
use crate::api::{DirectoryListing, StatusUpdateResponse};
use crate::content::{ContentBody, ContentPayload};
use crate::error::ApiError;
use crate::tree::{FileEntry, TreeStats};
use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_TYPE, ETAG};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

pub async fn index() -> Json<Value> {
    Json(service_info())
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Whole tree as nested `{files, dirs}`, validated by its fingerprint
pub async fn tree(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let api = state.api.clone();
    let tree = blocking(move || api.build_tree()).await?;
    let etag = entity_tag(&crate::tree::hasher::fingerprint_hex(tree.root()));

    if etag_matches(&headers, &etag) {
        debug!(etag = %etag, "Tree unchanged");
        return Ok(not_modified(&etag));
    }

    let mut response = Json(tree.root()).into_response();
    if let Ok(value) = HeaderValue::from_str(&etag) {
        response.headers_mut().insert(ETAG, value);
    }
    Ok(response)
}

fn not_modified(etag: &str) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    if let Ok(value) = HeaderValue::from_str(etag) {
        response.headers_mut().insert(ETAG, value);
    }
    response
}

pub async fn root_listing(State(state): State<AppState>) -> Result<Json<DirectoryListing>, ApiError> {
    listing_for(state, String::new()).await
}

pub async fn listing(
    State(state): State<AppState>,
    Path(dir): Path<String>,
) -> Result<Json<DirectoryListing>, ApiError> {
    listing_for(state, dir).await
}

async fn listing_for(state: AppState, dir: String) -> Result<Json<DirectoryListing>, ApiError> {
    let api = state.api.clone();
    let dir = api.builder().base().reroot(&dir);
    blocking(move || api.directory_listing(&dir)).await.map(Json)
}

pub async fn file_info(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<FileEntry>, ApiError> {
    let api = state.api.clone();
    let path = api.builder().base().reroot(&path);
    blocking(move || api.file_info(&path)).await.map(Json)
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub path: Option<String>,
}

pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<TreeStats>, ApiError> {
    let api = state.api.clone();
    let path = query.path.map(|p| api.builder().base().reroot(&p));
    blocking(move || api.statistics(path.as_deref())).await.map(Json)
}

pub async fn thumbnail(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let payload = state.content.thumbnail(&path).await?;
    Ok(content_response(payload))
}

pub async fn photo(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let payload = state.content.photo(&path).await?;
    Ok(content_response(payload))
}

fn content_response(payload: ContentPayload) -> Response {
    let content_type = HeaderValue::from_str(&payload.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let body = match payload.body {
        ContentBody::Bytes(bytes) => Body::from(bytes),
        ContentBody::Stream(stream) => Body::from_stream(stream),
    };
    ([(CONTENT_TYPE, content_type)], body).into_response()
}

pub async fn update_statuses(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidRequest(format!("body is not valid JSON: {}", e)))?;
    let api = state.api.clone();
    blocking(move || api.update_statuses(&body)).await.map(Json)
}
