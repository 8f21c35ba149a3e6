//! Photo API
//!
//! One query cycle per call: full scan of the record store, a fresh tree
//! build, then navigation or aggregation. Trees are discarded after use.

use crate::config::TreeConfig;
use crate::error::ApiError;
use crate::store::{RecordStore, StatusUpdate};
use crate::tree::{FileEntry, PhotoTree, TreeBuilder, TreeStats};
use crate::types::Status;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Direct contents of one directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryListing {
    pub files: Vec<FileEntry>,
    pub directories: Vec<String>,
}

/// Parsed `{"updates": [...]}` body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusUpdateBatch {
    pub updates: Vec<StatusUpdate>,
    /// Entries without a usable `path` or `status`
    pub skipped: usize,
}

impl StatusUpdateBatch {
    /// Entries lacking `path` or `status` are skipped and counted; a missing
    /// or non-list `updates` key rejects the whole request.
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let updates = body
            .get("updates")
            .ok_or_else(|| ApiError::InvalidRequest("missing 'updates' key".to_string()))?
            .as_array()
            .ok_or_else(|| ApiError::InvalidRequest("'updates' must be a list".to_string()))?;

        let mut batch = Self::default();
        for (index, entry) in updates.iter().enumerate() {
            let path = entry.get("path").and_then(Value::as_str);
            let status = entry.get("status").and_then(Value::as_str);
            match (path, status) {
                (Some(path), Some(status)) if !path.trim().is_empty() => {
                    batch.updates.push(StatusUpdate {
                        path: path.to_string(),
                        status: Status::from(status),
                    });
                }
                _ => {
                    debug!(index, "Skipping status update without path or status");
                    batch.skipped += 1;
                }
            }
        }
        Ok(batch)
    }
}

/// Response body of a status update batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: String,
    pub updated_count: usize,
    pub skipped_count: usize,
    pub saved_updates: Vec<StatusUpdate>,
}

/// Query surface over a record store
#[derive(Clone)]
pub struct PhotoApi {
    store: Arc<dyn RecordStore>,
    builder: TreeBuilder,
}

impl PhotoApi {
    pub fn new(store: Arc<dyn RecordStore>, tree: &TreeConfig) -> Self {
        Self {
            store,
            builder: TreeBuilder::new(&tree.base_path).with_max_depth(tree.max_depth),
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn builder(&self) -> &TreeBuilder {
        &self.builder
    }

    /// Scan the store and fold every record into a fresh tree
    pub fn build_tree(&self) -> Result<PhotoTree, ApiError> {
        let records = self.store.list_all()?;
        let tree = PhotoTree::build(&self.builder, &records);
        let report = tree.report();
        if report.skipped() > 0 {
            info!(
                skipped_empty = report.skipped_empty,
                skipped_too_deep = report.skipped_too_deep,
                "Some records were left out of the tree"
            );
        }
        Ok(tree)
    }

    pub fn directory_listing(&self, path: &str) -> Result<DirectoryListing, ApiError> {
        let tree = self.build_tree()?;
        let contents = tree
            .directory_contents(path)
            .ok_or_else(|| ApiError::PathNotInTree(path.to_string()))?;
        Ok(DirectoryListing {
            files: contents.files.to_vec(),
            directories: contents.directories.iter().map(|d| d.to_string()).collect(),
        })
    }

    pub fn file_info(&self, path: &str) -> Result<FileEntry, ApiError> {
        let tree = self.build_tree()?;
        tree.file_info(path)
            .cloned()
            .ok_or_else(|| ApiError::PathNotInTree(path.to_string()))
    }

    /// Rolled-up statistics for the whole tree or one directory
    pub fn statistics(&self, path: Option<&str>) -> Result<TreeStats, ApiError> {
        let tree = self.build_tree()?;
        let path = path.filter(|p| !p.is_empty());
        tree.statistics(path)
            .ok_or_else(|| ApiError::PathNotInTree(path.unwrap_or_default().to_string()))
    }

    /// Apply a raw update body as one atomic batch
    pub fn update_statuses(&self, body: &Value) -> Result<StatusUpdateResponse, ApiError> {
        let batch = StatusUpdateBatch::from_json(body)?;
        self.apply_batch(batch)
    }

    pub fn apply_batch(&self, batch: StatusUpdateBatch) -> Result<StatusUpdateResponse, ApiError> {
        let report = self.store.apply_status_updates(&batch.updates).map_err(|e| {
            warn!(error = %e, "Status update batch rolled back");
            e
        })?;
        self.store.flush()?;
        info!(
            updated = report.updated,
            inserted = report.inserted,
            skipped = batch.skipped,
            "Applied status updates"
        );
        Ok(StatusUpdateResponse {
            success: true,
            message: format!("Updated {} photo statuses", report.applied()),
            updated_count: report.applied(),
            skipped_count: batch.skipped,
            saved_updates: report.saved,
        })
    }
}
