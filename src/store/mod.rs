//! Photo Record Store
//!
//! Flat persisted photo metadata, one record per path. The tree engine only
//! ever needs `list_all`; the remaining operations serve status updates and
//! directory imports.

pub mod memory;
pub mod persistence;

pub use memory::MemoryRecordStore;
pub use persistence::SledRecordStore;

use crate::error::StorageError;
use crate::types::Status;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// PhotoRecord: metadata and classification flags for one photo path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub path: String,
    #[serde(default)]
    pub is_nude: Option<bool>,
    #[serde(default)]
    pub has_face: Option<bool>,
    #[serde(default)]
    pub hash_sha256: Option<String>,
    #[serde(default)]
    pub clip_nude_score: Option<f32>,
    #[serde(default)]
    pub nsfw_score: Option<f32>,
    #[serde(default)]
    pub is_small: Option<bool>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub phash: Option<String>,
    #[serde(default)]
    pub shooting_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub modification_date: Option<NaiveDateTime>,
}

impl PhotoRecord {
    /// A record with only a path; every attribute unset
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_nude: None,
            has_face: None,
            hash_sha256: None,
            clip_nude_score: None,
            nsfw_score: None,
            is_small: None,
            status: None,
            phash: None,
            shooting_date: None,
            modification_date: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}

/// One `{path, status}` pair from a status update batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub path: String,
    pub status: Status,
}

/// Outcome of applying a status update batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusUpdateReport {
    /// Existing records whose status changed
    pub updated: usize,
    /// Paths that had no record and were created
    pub inserted: usize,
    /// The pairs as persisted, in batch order
    pub saved: Vec<StatusUpdate>,
}

impl StatusUpdateReport {
    pub fn applied(&self) -> usize {
        self.updated + self.inserted
    }
}

/// Record store interface
pub trait RecordStore: Send + Sync {
    /// Every record, in the store's iteration order
    fn list_all(&self) -> Result<Vec<PhotoRecord>, StorageError>;

    fn get(&self, path: &str) -> Result<Option<PhotoRecord>, StorageError>;

    /// Insert or replace the record keyed by `record.path`
    fn upsert(&self, record: &PhotoRecord) -> Result<(), StorageError>;

    /// Upsert statuses by path as one atomic batch.
    ///
    /// Existing records keep every other attribute; unknown paths get a new
    /// record carrying only path and status.
    fn apply_status_updates(
        &self,
        updates: &[StatusUpdate],
    ) -> Result<StatusUpdateReport, StorageError>;

    fn len(&self) -> Result<usize, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Make pending writes durable
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

pub(crate) fn validate_path(path: &str) -> Result<(), StorageError> {
    if path.trim().is_empty() {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
