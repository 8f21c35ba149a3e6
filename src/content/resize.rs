//! Local original resizing.

use super::ContentPayload;
use crate::error::ApiError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, GenericImageView};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

fn default_scale_divisor() -> u32 {
    3
}

fn default_jpeg_quality() -> u8 {
    85
}

/// Resize configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResizeConfig {
    /// Each dimension is divided by this factor
    #[serde(default = "default_scale_divisor")]
    pub scale_divisor: u32,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// When non-empty, only files under these roots may be served
    #[serde(default)]
    pub allowed_roots: Vec<PathBuf>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            scale_divisor: default_scale_divisor(),
            jpeg_quality: default_jpeg_quality(),
            allowed_roots: Vec::new(),
        }
    }
}

impl ResizeConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.scale_divisor == 0 {
            return Err("resize.scale_divisor must be at least 1".to_string());
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(format!(
                "resize.jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }
}

/// Stored paths may lack their leading separator; originals are absolute.
pub fn absolute_photo_path(path: &str) -> PathBuf {
    if path.starts_with('/') {
        PathBuf::from(path)
    } else {
        PathBuf::from(format!("/{}", path))
    }
}

/// Target dimensions, never below one pixel
pub fn scaled_dimensions(width: u32, height: u32, divisor: u32) -> (u32, u32) {
    let divisor = divisor.max(1);
    ((width / divisor).max(1), (height / divisor).max(1))
}

/// Decode, downscale with Lanczos3 and re-encode as JPEG.
pub fn resize_file(path: &Path, config: &ResizeConfig) -> Result<Vec<u8>, ApiError> {
    let decode_failed = |reason: String| ApiError::DecodeFailed {
        path: path.display().to_string(),
        reason,
    };

    let image = image::open(path).map_err(|e| decode_failed(e.to_string()))?;
    let (width, height) = image.dimensions();
    let (new_width, new_height) = scaled_dimensions(width, height, config.scale_divisor);
    let rgb = image
        .resize_exact(new_width, new_height, FilterType::Lanczos3)
        .to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, config.jpeg_quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|e| decode_failed(e.to_string()))?;

    debug!(
        path = %path.display(),
        from = ?(width, height),
        to = ?(new_width, new_height),
        bytes = out.len(),
        "Resized original"
    );
    Ok(out)
}

/// Serves downscaled JPEGs of local originals
#[derive(Debug, Clone)]
pub struct LocalResizer {
    config: ResizeConfig,
}

impl LocalResizer {
    pub fn new(config: ResizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Locate the original on disk, enforcing `allowed_roots`.
    pub fn locate(&self, path: &str) -> Result<PathBuf, ApiError> {
        let absolute = absolute_photo_path(path);
        if !absolute.is_file() {
            return Err(ApiError::ContentNotFound(absolute.display().to_string()));
        }
        if self.config.allowed_roots.is_empty() {
            return Ok(absolute);
        }

        let canonical = dunce::canonicalize(&absolute)
            .map_err(|_| ApiError::ContentNotFound(absolute.display().to_string()))?;
        let allowed = self.config.allowed_roots.iter().any(|root| {
            dunce::canonicalize(root)
                .map(|root| canonical.starts_with(root))
                .unwrap_or(false)
        });
        if !allowed {
            warn!(path = %canonical.display(), "Refusing to serve file outside allowed roots");
            return Err(ApiError::ContentNotFound(absolute.display().to_string()));
        }
        Ok(canonical)
    }

    pub async fn resize(&self, path: &str) -> Result<ContentPayload, ApiError> {
        let located = self.locate(path)?;
        let config = self.config.clone();
        let bytes = tokio::task::spawn_blocking(move || resize_file(&located, &config)).await??;
        Ok(ContentPayload::bytes("image/jpeg", bytes))
    }
}
