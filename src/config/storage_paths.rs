//! StorageConfig and store path resolution.

use crate::config::xdg;
use crate::error::ApiError;
use crate::store::persistence::DEFAULT_TABLE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Record store directory; None means `$XDG_DATA_HOME/photoadmin/store`
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Table (sled tree) holding photo records
    #[serde(default = "default_table")]
    pub table: String,
}

impl StorageConfig {
    /// Resolve the store directory to an actual filesystem location.
    pub fn resolve_store_path(&self) -> Result<PathBuf, ApiError> {
        match &self.store_path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => Ok(xdg::data_dir()?.join("store")),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            table: default_table(),
        }
    }
}
