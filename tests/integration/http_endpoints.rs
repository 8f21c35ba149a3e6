use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::header::{CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use photoadmin::api::PhotoApi;
use photoadmin::config::TreeConfig;
use photoadmin::content::{ContentPayload, ContentSource};
use photoadmin::error::ApiError;
use photoadmin::http::{router, AppState};
use photoadmin::store::MemoryRecordStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::support::sample_records;

/// Serves fixed bytes and fails for paths containing "missing"
struct StubContent;

#[async_trait]
impl ContentSource for StubContent {
    async fn thumbnail(&self, path: &str) -> Result<ContentPayload, ApiError> {
        if path.contains("missing") {
            return Err(ApiError::ContentFetchFailed {
                target: format!("https://gallery.test/pgapi/gallery/content/{}", path),
                status: Some(404),
                reason: "gallery responded with 404".to_string(),
            });
        }
        let chunks = vec![Ok(Bytes::from_static(b"thumb"))];
        Ok(ContentPayload::streamed("image/webp", futures::stream::iter(chunks)))
    }

    async fn photo(&self, path: &str) -> Result<ContentPayload, ApiError> {
        if path.contains("missing") {
            return Err(ApiError::ContentNotFound(format!("/{}", path)));
        }
        Ok(ContentPayload::bytes("image/jpeg", vec![0xFF, 0xD8, 0xFF]))
    }
}

fn app() -> axum::Router {
    let store = MemoryRecordStore::with_records(sample_records());
    let api = PhotoApi::new(Arc::new(store), &TreeConfig::default());
    router(AppState::new(api, Arc::new(StubContent)))
}

async fn send(app: axum::Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

async fn get(app: axum::Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn tree_endpoint_serves_nested_json_with_etag() {
    let response = get(app(), "/api/tree").await;
    assert_eq!(response.status(), StatusCode::OK);
    let etag = response.headers().get(ETAG).unwrap().clone();

    let body = json_body(response).await;
    assert_eq!(body["dirs"]["A"]["dirs"]["C"]["files"][0]["path"], "A/C/d.jpg");

    let revalidated = send(
        app(),
        Request::get("/api/tree")
            .header(IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(revalidated.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn photos_endpoint_lists_root_and_subdirectories() {
    let root = json_body(get(app(), "/api/photos").await).await;
    assert_eq!(root["directories"], json!(["A", "E"]));
    assert_eq!(root["files"], json!([]));

    let a = json_body(get(app(), "/api/photos/A").await).await;
    assert_eq!(a["directories"], json!(["C"]));
    assert_eq!(a["files"][0]["status"], "review");

    let missing = get(app(), "/api/photos/A/Z").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(missing).await["path"], "A/Z");
}

#[tokio::test]
async fn file_endpoint_returns_entry_or_404() {
    let found = get(app(), "/api/file/E/f.jpg").await;
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(json_body(found).await["path"], "E/f.jpg");

    let missing = get(app(), "/api/file/E/nope.jpg").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_endpoint_supports_scopes() {
    let global = json_body(get(app(), "/api/stats").await).await;
    assert_eq!(global["total_files"], 3);
    assert_eq!(global["directories"], 3);
    assert_eq!(global["by_status"], json!({"review": 2, "approved": 1}));

    let scoped = json_body(get(app(), "/api/stats?path=A").await).await;
    assert_eq!(scoped["total_files"], 2);

    let unknown = get(app(), "/api/stats?path=Q").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn content_endpoints_stream_bytes_and_map_failures() {
    let thumb = get(app(), "/api/thumbnail/mnt/smb/OneDrive/Pictures/a.jpg").await;
    assert_eq!(thumb.status(), StatusCode::OK);
    assert_eq!(thumb.headers().get(CONTENT_TYPE).unwrap(), "image/webp");
    let bytes = to_bytes(thumb.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"thumb");

    let failed = get(app(), "/api/thumbnail/missing.jpg").await;
    assert_eq!(failed.status(), StatusCode::NOT_FOUND);
    let body = json_body(failed).await;
    assert!(body["url"].as_str().unwrap().starts_with("https://gallery.test/"));

    let photo = get(app(), "/api/photo/srv/a.jpg").await;
    assert_eq!(photo.headers().get(CONTENT_TYPE).unwrap(), "image/jpeg");

    let missing = get(app(), "/api/photo/missing.jpg").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_statuses_reports_counts_and_rejects_bad_bodies() {
    let app = app();
    let request = Request::post("/api/update_statuses")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "updates": [
                    {"path": "A/b.jpg", "status": "approved"},
                    {"status": "rejected"}
                ]
            })
            .to_string(),
        ))
        .unwrap();
    let response = send(app.clone(), request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["updated_count"], 1);
    assert_eq!(body["skipped_count"], 1);
    assert_eq!(body["saved_updates"][0]["status"], "approved");

    let stats = json_body(get(app.clone(), "/api/stats").await).await;
    assert_eq!(stats["by_status"]["approved"], 2);

    let bad = send(
        app.clone(),
        Request::post("/api/update_statuses")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let no_updates = send(
        app,
        Request::post("/api/update_statuses")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(no_updates.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_and_index() {
    let health = json_body(get(app(), "/health").await).await;
    assert_eq!(health["status"], "ok");

    let index = json_body(get(app(), "/").await).await;
    assert_eq!(index["name"], "photoadmin");
}
