//! HTTP Surface
//!
//! axum router over the photo API and the content server. Handlers are thin:
//! blocking work goes to the blocking pool and every failure is rendered
//! through `ApiError`'s response mapping.

mod handlers;
pub mod response;

use crate::api::PhotoApi;
use crate::config::{AdminConfig, ServerConfig};
use crate::content::{ContentServer, ContentSource};
use crate::error::ApiError;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub api: PhotoApi,
    pub content: Arc<dyn ContentSource>,
}

impl AppState {
    pub fn new(api: PhotoApi, content: Arc<dyn ContentSource>) -> Self {
        Self { api, content }
    }

    /// Serve `api` with the configured gallery and resizer
    pub fn from_config(api: PhotoApi, config: &AdminConfig) -> Result<Self, ApiError> {
        let content = ContentServer::from_config(&config.gallery, &config.resize)?;
        Ok(Self::new(api, Arc::new(content)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/tree", get(handlers::tree))
        .route("/api/photos", get(handlers::root_listing))
        .route("/api/photos/*dir", get(handlers::listing))
        .route("/api/file/*path", get(handlers::file_info))
        .route("/api/stats", get(handlers::stats))
        .route("/api/thumbnail/*path", get(handlers::thumbnail))
        .route("/api/photo/*path", get(handlers::photo))
        .route("/api/update_statuses", post(handlers::update_statuses))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn bind_address(server: &ServerConfig) -> Result<SocketAddr, ApiError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| {
            ApiError::ConfigError(format!(
                "Invalid listen address {}:{}: {}",
                server.host, server.port, e
            ))
        })
}

/// Serve until Ctrl-C
pub async fn serve(state: AppState, server: &ServerConfig) -> Result<(), ApiError> {
    let addr = bind_address(server)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::ConfigError(format!("Failed to bind {}: {}", addr, e)))?;
    info!(address = %addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::ConfigError(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
