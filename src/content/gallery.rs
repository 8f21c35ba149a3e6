//! Gallery thumbnail proxy.
//!
//! Stored paths point at a local storage mount; the gallery serves the same
//! files under its own namespace starting at an anchor directory. The proxy
//! rewrites one into the other and streams the gallery's response through.

use super::ContentPayload;
use crate::error::ApiError;
use futures::TryStreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

fn default_user_agent() -> String {
    "PhotoAdmin/1.0".to_string()
}

fn default_mount_prefixes() -> Vec<String> {
    vec!["/mnt/smb/OneDrive/".to_string()]
}

fn default_anchor() -> String {
    "Pictures/!Фотосессии".to_string()
}

fn default_thumbnail_size() -> u32 {
    480
}

fn default_timeout_secs() -> u64 {
    15
}

/// Remote gallery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Gallery root URL, e.g. `https://gallery.example.org`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Storage mount prefixes stripped from stored paths
    #[serde(default = "default_mount_prefixes")]
    pub mount_prefixes: Vec<String>,

    /// Directory where the gallery namespace begins
    #[serde(default = "default_anchor")]
    pub anchor: String,

    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            user_agent: default_user_agent(),
            mount_prefixes: default_mount_prefixes(),
            anchor: default_anchor(),
            thumbnail_size: default_thumbnail_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(base_url) = &self.base_url {
            let url = Url::parse(base_url)
                .map_err(|e| format!("Invalid gallery.base_url {}: {}", base_url, e))?;
            if url.cannot_be_a_base() {
                return Err(format!("gallery.base_url cannot be a base: {}", base_url));
            }
        }
        if self.thumbnail_size == 0 {
            return Err("gallery.thumbnail_size must be positive".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("gallery.timeout_secs must be positive".to_string());
        }
        Ok(())
    }
}

/// Rewrite a stored path into the gallery's namespace.
///
/// The first matching mount prefix is removed (with or without its leading
/// slash), then everything before the anchor is cut. Paths without the anchor
/// keep their remaining form.
pub fn gallery_relative_path(path: &str, mount_prefixes: &[String], anchor: &str) -> String {
    let mut relative = path;
    for prefix in mount_prefixes {
        if let Some(rest) = relative.strip_prefix(prefix.as_str()) {
            relative = rest;
            break;
        }
        let bare = prefix.trim_start_matches('/');
        if bare.is_empty() {
            continue;
        }
        if let Some(rest) = relative.strip_prefix(bare) {
            relative = rest;
            break;
        }
    }
    if !anchor.is_empty() {
        if let Some(index) = relative.find(anchor) {
            relative = &relative[index..];
        }
    }
    relative.trim_start_matches('/').to_string()
}

/// Authenticated client for gallery thumbnails
pub struct GalleryClient {
    config: GalleryConfig,
    client: reqwest::Client,
}

impl GalleryClient {
    pub fn new(config: GalleryConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    /// `<base>/pgapi/gallery/content/<relative>/thumbnail/<size>`
    pub fn thumbnail_url(&self, path: &str) -> Result<Url, ApiError> {
        let base_url = self.config.base_url.as_deref().ok_or_else(|| {
            ApiError::ContentFetchFailed {
                target: path.to_string(),
                status: None,
                reason: "gallery.base_url is not configured".to_string(),
            }
        })?;
        let mut url = Url::parse(base_url)
            .map_err(|e| ApiError::ConfigError(format!("Invalid gallery.base_url: {}", e)))?;
        let relative =
            gallery_relative_path(path, &self.config.mount_prefixes, &self.config.anchor);
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::ConfigError(format!("gallery.base_url cannot be a base: {}", base_url))
            })?;
            segments
                .pop_if_empty()
                .extend(["pgapi", "gallery", "content"])
                .extend(relative.split('/').filter(|s| !s.is_empty()))
                .push("thumbnail")
                .push(&self.config.thumbnail_size.to_string());
        }
        Ok(url)
    }

    /// Fetch a thumbnail and stream it back with the gallery's content type.
    ///
    /// Non-success statuses and transport errors are reported with the
    /// attempted URL and are not retried.
    pub async fn fetch_thumbnail(&self, path: &str) -> Result<ContentPayload, ApiError> {
        let url = self.thumbnail_url(path)?;
        let target = url.to_string();
        debug!(url = %target, "Fetching gallery thumbnail");

        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %target, error = %e, "Gallery request failed");
            ApiError::ContentFetchFailed {
                target: target.clone(),
                status: e.status().map(|s| s.as_u16()),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %target, status = status.as_u16(), "Gallery returned an error status");
            return Err(ApiError::ContentFetchFailed {
                target,
                status: Some(status.as_u16()),
                reason: format!("gallery responded with {}", status),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        Ok(ContentPayload::streamed(content_type, stream))
    }
}
