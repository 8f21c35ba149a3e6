//! Configuration
//!
//! Layered configuration built on the `config` crate. Precedence, lowest to
//! highest: built-in defaults, global file, local file, environment
//! (`PHOTOADMIN__SECTION__KEY`). An explicit `--config` file replaces both
//! file layers.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
mod storage_paths;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage_paths::StorageConfig;

use crate::content::gallery::GalleryConfig;
use crate::content::resize::ResizeConfig;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub resize: ResizeConfig,

    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AdminConfig {
    /// Reject values that would only fail later at request time
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.server.port == 0 {
            return Err(ApiError::ConfigError("server.port cannot be 0".to_string()));
        }
        if self.tree.max_depth == 0 || self.tree.max_depth > MAX_DEPTH_LIMIT {
            return Err(ApiError::ConfigError(format!(
                "tree.max_depth must be between 1 and {}",
                MAX_DEPTH_LIMIT
            )));
        }
        self.gallery.validate().map_err(ApiError::ConfigError)?;
        self.resize.validate().map_err(ApiError::ConfigError)?;
        Ok(())
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Tree building configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Prefix stripped from every record path before folding
    #[serde(default)]
    pub base_path: String,

    /// Maximum directory nesting below the base path
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "webp", "heic", "tif", "tiff"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Directory import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Directory scanned by `photoadmin import` when `--dir` is not given
    #[serde(default)]
    pub photo_dir: Option<PathBuf>,

    /// File extensions treated as photos (case-insensitive, without dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            photo_dir: None,
            extensions: default_extensions(),
        }
    }
}
