//! Content Server
//!
//! Byte-level image delivery, independent of the tree engine: thumbnails are
//! proxied from the remote gallery, full-resolution originals are decoded,
//! downscaled and re-encoded locally.

pub mod gallery;
pub mod resize;

pub use gallery::{GalleryClient, GalleryConfig};
pub use resize::{LocalResizer, ResizeConfig};

use crate::error::ApiError;
use async_trait::async_trait;
use axum::body::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};
use std::fmt;

/// Streamed response body chunks
pub type ByteStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// Body of a content response
pub enum ContentBody {
    Bytes(Vec<u8>),
    Stream(ByteStream),
}

/// Image bytes plus the content type to serve them with
pub struct ContentPayload {
    pub content_type: String,
    pub body: ContentBody,
}

impl ContentPayload {
    pub fn bytes(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            body: ContentBody::Bytes(bytes),
        }
    }

    pub fn streamed<S>(content_type: impl Into<String>, stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
    {
        Self {
            content_type: content_type.into(),
            body: ContentBody::Stream(stream.boxed()),
        }
    }

    /// Drain the body into memory
    pub async fn into_bytes(self) -> Result<Vec<u8>, std::io::Error> {
        match self.body {
            ContentBody::Bytes(bytes) => Ok(bytes),
            ContentBody::Stream(stream) => {
                stream
                    .try_fold(Vec::new(), |mut acc, chunk| async move {
                        acc.extend_from_slice(&chunk);
                        Ok(acc)
                    })
                    .await
            }
        }
    }
}

impl fmt::Debug for ContentPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            ContentBody::Bytes(bytes) => format!("{} bytes", bytes.len()),
            ContentBody::Stream(_) => "stream".to_string(),
        };
        f.debug_struct("ContentPayload")
            .field("content_type", &self.content_type)
            .field("body", &body)
            .finish()
    }
}

/// Source of image content for stored photo paths
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Gallery thumbnail for a stored path
    async fn thumbnail(&self, path: &str) -> Result<ContentPayload, ApiError>;

    /// Downscaled JPEG of a local original
    async fn photo(&self, path: &str) -> Result<ContentPayload, ApiError>;
}

/// Production content source: gallery proxy plus local resizer
pub struct ContentServer {
    gallery: GalleryClient,
    resizer: LocalResizer,
}

impl ContentServer {
    pub fn new(gallery: GalleryClient, resizer: LocalResizer) -> Self {
        Self { gallery, resizer }
    }

    pub fn from_config(gallery: &GalleryConfig, resize: &ResizeConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            GalleryClient::new(gallery.clone())?,
            LocalResizer::new(resize.clone()),
        ))
    }
}

#[async_trait]
impl ContentSource for ContentServer {
    async fn thumbnail(&self, path: &str) -> Result<ContentPayload, ApiError> {
        self.gallery.fetch_thumbnail(path).await
    }

    async fn photo(&self, path: &str) -> Result<ContentPayload, ApiError> {
        self.resizer.resize(path).await
    }
}
